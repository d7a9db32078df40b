// card-policy-core/src/runtime/directory.rs
// ============================================================================
// Module: In-Memory Card Directory
// Description: Read-only card directory backed by an ordered map.
// Purpose: Provide a deterministic directory for local serving and tests.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`InMemoryCardDirectory`] is populated once (typically from configuration)
//! and then only read, so it can be shared behind an `Arc` without locking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::Card;
use crate::core::CardNumber;
use crate::core::UserId;
use crate::interfaces::CardDirectory;
use crate::interfaces::CardLookupError;

// ============================================================================
// SECTION: In-Memory Directory
// ============================================================================

/// In-memory card directory keyed by holder and card number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCardDirectory {
    /// Cards keyed by `(user, card number)`.
    cards: BTreeMap<(UserId, CardNumber), Card>,
}

impl InMemoryCardDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: BTreeMap::new(),
        }
    }

    /// Adds a card for a user, returning the snapshot it replaced.
    pub fn insert(&mut self, user_id: UserId, card: Card) -> Option<Card> {
        let key = (user_id, card.card_number().clone());
        self.cards.insert(key, card)
    }

    /// Returns the number of stored cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<(UserId, Card)> for InMemoryCardDirectory {
    fn from_iter<I: IntoIterator<Item = (UserId, Card)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (user_id, card) in iter {
            directory.insert(user_id, card);
        }
        directory
    }
}

impl CardDirectory for InMemoryCardDirectory {
    fn card_details(
        &self,
        user_id: &UserId,
        card_number: &CardNumber,
    ) -> Result<Option<Card>, CardLookupError> {
        let key = (user_id.clone(), card_number.clone());
        Ok(self.cards.get(&key).cloned())
    }
}
