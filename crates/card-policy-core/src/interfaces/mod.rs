// card-policy-core/src/interfaces/mod.rs
// ============================================================================
// Module: Card Policy Interfaces
// Description: Backend-agnostic contract for card-detail lookup.
// Purpose: Define how callers resolve card state before evaluation.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The rule engine never fetches card state itself. Callers resolve a
//! [`Card`] snapshot through a [`CardDirectory`] and hand it to the evaluator.
//! Directory lookups are the only place latency or failure can occur.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Card;
use crate::core::CardNumber;
use crate::core::UserId;

// ============================================================================
// SECTION: Card Directory
// ============================================================================

/// Card directory errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardLookupError {
    /// The backing system of record could not answer.
    #[error("card directory unavailable: {0}")]
    Unavailable(String),
}

/// System of record for current card state.
pub trait CardDirectory: Send + Sync {
    /// Resolves the current snapshot of a card owned by a user.
    ///
    /// Returns `Ok(None)` when the user holds no card with that number.
    ///
    /// # Errors
    ///
    /// Returns [`CardLookupError`] when the lookup itself fails.
    fn card_details(
        &self,
        user_id: &UserId,
        card_number: &CardNumber,
    ) -> Result<Option<Card>, CardLookupError>;
}
