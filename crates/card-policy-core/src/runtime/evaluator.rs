// card-policy-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Eligibility Evaluator
// Description: Stateless application of the rule catalog to card snapshots.
// Purpose: Answer which actions are allowed, how many, and whether one is.
// Dependencies: crate::{core, runtime::catalog}, serde, thiserror
// ============================================================================

//! ## Overview
//! The evaluator is a pure function of its inputs. It holds a shared reference
//! to an immutable [`RuleCatalog`] and nothing else, so any number of threads
//! may query one evaluator concurrently without coordination.
//!
//! Every query is `O(CardAction::COUNT)`. Results follow catalog declaration
//! order, and the count always equals the number of allowed actions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::Card;
use crate::core::CardAction;
use crate::core::UnknownActionError;
use crate::runtime::catalog::RuleCatalog;
use crate::runtime::catalog::RuleEntry;
use crate::runtime::catalog::RuleNotFoundError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Evaluation failures raised synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// A required argument was absent.
    #[error("invalid argument: {argument} is required")]
    InvalidArgument {
        /// Name of the missing argument.
        argument: &'static str,
    },
    /// The action is not a catalog key.
    #[error(transparent)]
    UnknownAction(#[from] UnknownActionError),
}

impl From<RuleNotFoundError> for EligibilityError {
    fn from(err: RuleNotFoundError) -> Self {
        Self::UnknownAction(UnknownActionError::new(err.action.as_str()))
    }
}

// ============================================================================
// SECTION: Eligibility Result
// ============================================================================

/// Allowed actions for one card, with their count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Allowed actions in catalog order.
    pub actions: Vec<CardAction>,
    /// Number of allowed actions.
    pub count: usize,
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Applies a rule catalog to card snapshots.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator<'a> {
    /// Catalog consulted for every query.
    catalog: &'a RuleCatalog,
}

impl EligibilityEvaluator<'static> {
    /// Creates an evaluator over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(RuleCatalog::standard())
    }
}

impl Default for EligibilityEvaluator<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> EligibilityEvaluator<'a> {
    /// Creates an evaluator over the provided catalog.
    #[must_use]
    pub const fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
        }
    }

    /// Returns the catalog in use.
    #[must_use]
    pub const fn catalog(&self) -> &'a RuleCatalog {
        self.catalog
    }

    /// Returns the actions whose rule holds for the card, in catalog order.
    #[must_use]
    pub fn allowed_actions(&self, card: &Card) -> Vec<CardAction> {
        self.catalog
            .entries()
            .iter()
            .filter(|entry| entry.evaluate(card))
            .map(RuleEntry::action)
            .collect()
    }

    /// Returns how many actions are allowed for the card.
    #[must_use]
    pub fn allowed_actions_count(&self, card: &Card) -> usize {
        self.catalog.entries().iter().filter(|entry| entry.evaluate(card)).count()
    }

    /// Returns whether a single action is allowed for the card.
    ///
    /// # Errors
    ///
    /// Returns [`EligibilityError::UnknownAction`] when the catalog has no rule
    /// for the action.
    pub fn is_action_allowed(
        &self,
        card: &Card,
        action: CardAction,
    ) -> Result<bool, EligibilityError> {
        let predicate = self.catalog.lookup(action)?;
        Ok(predicate(card))
    }

    /// Evaluates a card that may be absent, as received from an untrusted boundary.
    ///
    /// # Errors
    ///
    /// Returns [`EligibilityError::InvalidArgument`] when `card` is `None`.
    pub fn evaluate(&self, card: Option<&Card>) -> Result<Eligibility, EligibilityError> {
        let card = require_card(card)?;
        Ok(Eligibility {
            actions: self.allowed_actions(card),
            count: self.allowed_actions_count(card),
        })
    }

    /// Tests an action named by untrusted text against a card that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`EligibilityError::InvalidArgument`] when `card` is `None` and
    /// [`EligibilityError::UnknownAction`] when `action` names no catalog key.
    pub fn is_action_allowed_by_name(
        &self,
        card: Option<&Card>,
        action: &str,
    ) -> Result<bool, EligibilityError> {
        let card = require_card(card)?;
        let action: CardAction = action.parse()?;
        self.is_action_allowed(card, action)
    }
}

/// Rejects an absent card.
const fn require_card(card: Option<&Card>) -> Result<&Card, EligibilityError> {
    match card {
        Some(card) => Ok(card),
        None => Err(EligibilityError::InvalidArgument {
            argument: "card",
        }),
    }
}
