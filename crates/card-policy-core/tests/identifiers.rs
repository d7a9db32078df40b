// card-policy-core/tests/identifiers.rs
// ============================================================================
// Module: Boundary Parsing Tests
// Description: Parsing and serialization of actions, card types, and statuses.
// ============================================================================
//! ## Overview
//! Ensures untrusted text and integers map onto the closed enumerations or
//! fail with a distinct error.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use card_policy_core::Card;
use card_policy_core::CardAction;
use card_policy_core::CardStatus;
use card_policy_core::CardType;
use card_policy_core::UnknownActionError;
use serde_json::json;

// ============================================================================
// SECTION: Card Actions
// ============================================================================

#[test]
fn actions_parse_from_canonical_names() {
    for action in CardAction::ALL {
        assert_eq!(action.as_str().parse::<CardAction>(), Ok(action));
        assert_eq!(action.as_str().to_lowercase().parse::<CardAction>(), Ok(action));
    }
}

#[test]
fn actions_parse_from_numbers() {
    for (index, action) in CardAction::ALL.into_iter().enumerate() {
        assert_eq!(action.index(), index);
        assert_eq!(CardAction::try_from(action.number()), Ok(action));
    }
}

#[test]
fn unknown_action_inputs_are_rejected() {
    assert_eq!("ACTION0".parse::<CardAction>(), Err(UnknownActionError::new("ACTION0")));
    assert_eq!("ACTION14".parse::<CardAction>(), Err(UnknownActionError::new("ACTION14")));
    assert_eq!("".parse::<CardAction>(), Err(UnknownActionError::new("")));
    assert_eq!(CardAction::try_from(0), Err(UnknownActionError::new("0")));
    assert_eq!(CardAction::try_from(14), Err(UnknownActionError::new("14")));
    assert_eq!(UnknownActionError::new("x").to_string(), "unknown card action: x");
}

#[test]
fn actions_serialize_as_canonical_names() {
    let value = serde_json::to_value([CardAction::Action1, CardAction::Action13]).unwrap();
    assert_eq!(value, json!(["ACTION1", "ACTION13"]));
    let parsed: CardAction = serde_json::from_value(json!("ACTION10")).unwrap();
    assert_eq!(parsed, CardAction::Action10);
    assert!(serde_json::from_value::<CardAction>(json!("ACTION14")).is_err());
}

// ============================================================================
// SECTION: Card Fields
// ============================================================================

#[test]
fn card_fields_parse_case_insensitively() {
    assert_eq!("credit".parse::<CardType>(), Ok(CardType::Credit));
    assert_eq!(" Prepaid ".parse::<CardType>(), Ok(CardType::Prepaid));
    assert_eq!("BLOCKED".parse::<CardStatus>(), Ok(CardStatus::Blocked));
    let err = "frozen".parse::<CardStatus>().expect_err("unknown status");
    assert_eq!(err.value(), "frozen");
    assert_eq!(err.to_string(), "unknown card status: frozen");
}

#[test]
fn card_snapshot_round_trips_through_json() {
    let card = Card::new("123", CardType::Debit, CardStatus::Ordered, false);
    let value = serde_json::to_value(&card).unwrap();
    assert_eq!(
        value,
        json!({
            "card_number": "123",
            "card_type": "Debit",
            "card_status": "Ordered",
            "is_pin_set": false
        })
    );
    let parsed: Card = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, card);
}
