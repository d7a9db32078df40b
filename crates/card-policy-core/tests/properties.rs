// card-policy-core/tests/properties.rs
// ============================================================================
// Module: Eligibility Property-Based Tests
// Description: Property tests for evaluator consistency and rule independence.
// Purpose: Check quantified invariants across the full card-state space.
// ============================================================================

//! Property-based tests for eligibility invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use card_policy_core::Card;
use card_policy_core::CardAction;
use card_policy_core::CardStatus;
use card_policy_core::CardType;
use card_policy_core::EligibilityEvaluator;
use proptest::prelude::*;

fn card_type_strategy() -> impl Strategy<Value = CardType> {
    prop::sample::select(CardType::ALL.to_vec())
}

fn card_status_strategy() -> impl Strategy<Value = CardStatus> {
    prop::sample::select(CardStatus::ALL.to_vec())
}

fn card_strategy() -> impl Strategy<Value = Card> {
    ("[0-9]{0,19}", card_type_strategy(), card_status_strategy(), any::<bool>()).prop_map(
        |(number, card_type, status, pin)| Card::new(number, card_type, status, pin),
    )
}

fn allowed(card: &Card, action: CardAction) -> bool {
    EligibilityEvaluator::standard().is_action_allowed(card, action).expect("known action")
}

proptest! {
    #[test]
    fn count_matches_allowed_actions(card in card_strategy()) {
        let evaluator = EligibilityEvaluator::standard();
        prop_assert_eq!(evaluator.allowed_actions_count(&card), evaluator.allowed_actions(&card).len());
    }

    #[test]
    fn single_checks_match_membership(card in card_strategy()) {
        let allowed_actions = EligibilityEvaluator::standard().allowed_actions(&card);
        for action in CardAction::ALL {
            prop_assert_eq!(allowed(&card, action), allowed_actions.contains(&action));
        }
    }

    #[test]
    fn only_action5_depends_on_card_type(
        status in card_status_strategy(),
        pin in any::<bool>(),
        left in card_type_strategy(),
        right in card_type_strategy(),
    ) {
        let left_card = Card::new("123", left, status, pin);
        let right_card = Card::new("123", right, status, pin);
        for action in CardAction::ALL.into_iter().filter(|action| *action != CardAction::Action5) {
            prop_assert_eq!(allowed(&left_card, action), allowed(&right_card, action));
        }
    }

    #[test]
    fn only_action6_and_action7_depend_on_pin(
        card_type in card_type_strategy(),
        status in card_status_strategy(),
    ) {
        let with_pin = Card::new("123", card_type, status, true);
        let without_pin = Card::new("123", card_type, status, false);
        for action in CardAction::ALL
            .into_iter()
            .filter(|action| !matches!(action, CardAction::Action6 | CardAction::Action7))
        {
            prop_assert_eq!(allowed(&with_pin, action), allowed(&without_pin, action));
        }
    }

    #[test]
    fn allowed_actions_follow_declaration_order(card in card_strategy()) {
        let allowed_actions = EligibilityEvaluator::standard().allowed_actions(&card);
        prop_assert!(allowed_actions.windows(2).all(|pair| pair[0].index() < pair[1].index()));
    }

    #[test]
    fn repeated_queries_are_identical(card in card_strategy()) {
        let evaluator = EligibilityEvaluator::standard();
        prop_assert_eq!(evaluator.allowed_actions(&card), evaluator.allowed_actions(&card));
    }
}
