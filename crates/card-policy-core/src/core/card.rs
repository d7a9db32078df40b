// card-policy-core/src/core/card.rs
// ============================================================================
// Module: Card Snapshot
// Description: Card type, lifecycle status, and immutable card snapshots.
// Purpose: Provide the point-in-time card state that eligibility rules read.
// Dependencies: crate::core::identifiers, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Card`] is an immutable snapshot assembled by a caller that already
//! fetched the card from its system of record. It is fully determined by its
//! four fields and exposes no mutators; every query receives its own value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::CardNumber;

// ============================================================================
// SECTION: Card Type
// ============================================================================

/// Product family of a payment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Prepaid card.
    Prepaid,
    /// Debit card.
    Debit,
    /// Credit card.
    Credit,
}

impl CardType {
    /// All card types in declaration order.
    pub const ALL: [Self; 3] = [Self::Prepaid, Self::Debit, Self::Credit];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prepaid => "Prepaid",
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = CardFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CardFieldError::new("card type", value))
    }
}

// ============================================================================
// SECTION: Card Status
// ============================================================================

/// Lifecycle status of a payment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Card ordered but not yet delivered.
    Ordered,
    /// Card delivered but not activated.
    Inactive,
    /// Card active and usable.
    Active,
    /// Card temporarily restricted.
    Restricted,
    /// Card blocked by the holder or issuer.
    Blocked,
    /// Card past its expiry date.
    Expired,
    /// Card permanently closed.
    Closed,
}

impl CardStatus {
    /// All card statuses in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Ordered,
        Self::Inactive,
        Self::Active,
        Self::Restricted,
        Self::Blocked,
        Self::Expired,
        Self::Closed,
    ];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "Ordered",
            Self::Inactive => "Inactive",
            Self::Active => "Active",
            Self::Restricted => "Restricted",
            Self::Blocked => "Blocked",
            Self::Expired => "Expired",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = CardFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| CardFieldError::new("card status", value))
    }
}

/// Text did not name a known card type or status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field}: {value}")]
pub struct CardFieldError {
    /// Field being parsed.
    field: &'static str,
    /// Rejected input.
    value: String,
}

impl CardFieldError {
    /// Builds a parse error for the given field.
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// SECTION: Card Snapshot
// ============================================================================

/// Immutable point-in-time view of a payment card.
///
/// # Invariants
/// - Fully determined by its four fields; no method mutates a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Opaque card number.
    card_number: CardNumber,
    /// Product family.
    card_type: CardType,
    /// Lifecycle status.
    card_status: CardStatus,
    /// Whether a PIN has been provisioned.
    is_pin_set: bool,
}

impl Card {
    /// Creates a card snapshot.
    #[must_use]
    pub fn new(
        card_number: impl Into<CardNumber>,
        card_type: CardType,
        card_status: CardStatus,
        is_pin_set: bool,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            card_type,
            card_status,
            is_pin_set,
        }
    }

    /// Returns the card number.
    #[must_use]
    pub const fn card_number(&self) -> &CardNumber {
        &self.card_number
    }

    /// Returns the card type.
    #[must_use]
    pub const fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Returns the card status.
    #[must_use]
    pub const fn card_status(&self) -> CardStatus {
        self.card_status
    }

    /// Returns whether a PIN has been provisioned.
    #[must_use]
    pub const fn is_pin_set(&self) -> bool {
        self.is_pin_set
    }
}
