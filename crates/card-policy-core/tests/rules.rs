// card-policy-core/tests/rules.rs
// ============================================================================
// Module: Standard Rule Tests
// Description: Truth-table checks for every rule in the standard catalog.
// ============================================================================
//! ## Overview
//! Each rule is checked against every status it depends on, including the
//! statuses that must always deny and the blocked-card PIN asymmetry.

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
use card_policy_core::RuleCatalog;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn allowed(action: CardAction, card_type: CardType, status: CardStatus, pin: bool) -> bool {
    let card = Card::new("123", card_type, status, pin);
    let predicate = RuleCatalog::standard().lookup(action).expect("rule present");
    predicate(&card)
}

fn prepaid(action: CardAction, status: CardStatus, pin: bool) -> bool {
    allowed(action, CardType::Prepaid, status, pin)
}

/// Asserts a pin-insensitive status rule against the exact set of allowing statuses.
fn assert_status_rule(action: CardAction, allowing: &[CardStatus]) {
    for status in CardStatus::ALL {
        for pin in [false, true] {
            assert_eq!(
                prepaid(action, status, pin),
                allowing.contains(&status),
                "{action} with status {status} and pin {pin}"
            );
        }
    }
}

// ============================================================================
// SECTION: Status Rules
// ============================================================================

#[test]
fn action1_requires_active() {
    assert_status_rule(CardAction::Action1, &[CardStatus::Active]);
}

#[test]
fn action2_requires_inactive() {
    assert_status_rule(CardAction::Action2, &[CardStatus::Inactive]);
}

#[test]
fn action8_allows_open_and_blocked() {
    assert_status_rule(
        CardAction::Action8,
        &[CardStatus::Ordered, CardStatus::Inactive, CardStatus::Active, CardStatus::Blocked],
    );
}

#[test]
fn action10_12_13_allow_open_statuses() {
    for action in [CardAction::Action10, CardAction::Action12, CardAction::Action13] {
        assert_status_rule(action, &[CardStatus::Ordered, CardStatus::Inactive, CardStatus::Active]);
    }
}

#[test]
fn action11_allows_inactive_and_active() {
    assert_status_rule(CardAction::Action11, &[CardStatus::Inactive, CardStatus::Active]);
}

// ============================================================================
// SECTION: Unconditional And Type Rules
// ============================================================================

#[test]
fn action3_4_9_are_always_allowed() {
    for action in [CardAction::Action3, CardAction::Action4, CardAction::Action9] {
        for card_type in CardType::ALL {
            for status in CardStatus::ALL {
                for pin in [false, true] {
                    assert!(allowed(action, card_type, status, pin));
                }
            }
        }
    }
}

#[test]
fn action5_depends_only_on_credit_type() {
    for card_type in CardType::ALL {
        for status in CardStatus::ALL {
            for pin in [false, true] {
                assert_eq!(
                    allowed(CardAction::Action5, card_type, status, pin),
                    card_type == CardType::Credit
                );
            }
        }
    }
}

// ============================================================================
// SECTION: PIN Rules
// ============================================================================

#[test]
fn action6_requires_pin_on_open_or_blocked_card() {
    for status in [CardStatus::Ordered, CardStatus::Inactive, CardStatus::Active, CardStatus::Blocked]
    {
        assert!(prepaid(CardAction::Action6, status, true), "{status} with pin");
        assert!(!prepaid(CardAction::Action6, status, false), "{status} without pin");
    }
}

#[test]
fn action7_requires_missing_pin_on_open_card() {
    for status in [CardStatus::Ordered, CardStatus::Inactive, CardStatus::Active] {
        assert!(prepaid(CardAction::Action7, status, false), "{status} without pin");
        assert!(!prepaid(CardAction::Action7, status, true), "{status} with pin");
    }
}

#[test]
fn action6_and_action7_are_complementary_on_open_cards() {
    for status in [CardStatus::Ordered, CardStatus::Inactive, CardStatus::Active] {
        for pin in [false, true] {
            let six = prepaid(CardAction::Action6, status, pin);
            let seven = prepaid(CardAction::Action7, status, pin);
            assert!(six ^ seven, "{status} with pin {pin}");
        }
    }
}

#[test]
fn blocked_card_pin_rules_are_not_complementary() {
    assert!(prepaid(CardAction::Action6, CardStatus::Blocked, true));
    assert!(prepaid(CardAction::Action7, CardStatus::Blocked, true));
    assert!(!prepaid(CardAction::Action6, CardStatus::Blocked, false));
    assert!(!prepaid(CardAction::Action7, CardStatus::Blocked, false));
}

// ============================================================================
// SECTION: Terminal Statuses
// ============================================================================

#[test]
fn restricted_expired_closed_deny_every_status_rule() {
    let status_rules = [
        CardAction::Action1,
        CardAction::Action2,
        CardAction::Action6,
        CardAction::Action7,
        CardAction::Action8,
        CardAction::Action10,
        CardAction::Action11,
        CardAction::Action12,
        CardAction::Action13,
    ];
    for status in [CardStatus::Restricted, CardStatus::Expired, CardStatus::Closed] {
        for card_type in CardType::ALL {
            for pin in [false, true] {
                for action in status_rules {
                    assert!(
                        !allowed(action, card_type, status, pin),
                        "{action} allowed for {card_type} {status} pin {pin}"
                    );
                }
            }
        }
    }
}
