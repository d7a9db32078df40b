// card-policy-core/src/core/identifiers.rs
// ============================================================================
// Module: Card Policy Identifiers
// Description: Opaque identifiers for card holders and payment cards.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings. The rule engine never validates or
//! interprets them; blank-value checks belong to the presentation layer that
//! accepts them from callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of trailing card-number characters left visible by [`CardNumber::masked`].
const VISIBLE_SUFFIX_LEN: usize = 4;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Card holder identifier as known to the card system of record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Payment card number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Creates a new card number.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Returns the card number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the card number with all but the last four characters masked.
    ///
    /// Numbers of four characters or fewer are masked entirely.
    #[must_use]
    pub fn masked(&self) -> String {
        let total = self.0.chars().count();
        let hidden = if total > VISIBLE_SUFFIX_LEN { total - VISIBLE_SUFFIX_LEN } else { total };
        self.0
            .chars()
            .enumerate()
            .map(|(index, ch)| if index < hidden { '*' } else { ch })
            .collect()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CardNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardNumber {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
