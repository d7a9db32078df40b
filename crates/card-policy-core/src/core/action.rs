// card-policy-core/src/core/action.rs
// ============================================================================
// Module: Card Actions
// Description: The closed set of actions a caller may attempt against a card.
// Purpose: Provide policy-significant action tokens with guarded parsing.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`CardAction`] enumerates the thirteen actions governed by the rule
//! catalog. Actions carry no ordering significance beyond declaration order,
//! which the catalog reuses for deterministic iteration.
//!
//! Text and integer inputs are untrusted: anything outside the enumeration is
//! rejected with [`UnknownActionError`] rather than mapped to a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Card Action
// ============================================================================

/// Action a caller may attempt against a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardAction {
    /// Action 1.
    Action1,
    /// Action 2.
    Action2,
    /// Action 3.
    Action3,
    /// Action 4.
    Action4,
    /// Action 5.
    Action5,
    /// Action 6.
    Action6,
    /// Action 7.
    Action7,
    /// Action 8.
    Action8,
    /// Action 9.
    Action9,
    /// Action 10.
    Action10,
    /// Action 11.
    Action11,
    /// Action 12.
    Action12,
    /// Action 13.
    Action13,
}

impl CardAction {
    /// Number of actions in the enumeration.
    pub const COUNT: usize = 13;

    /// All actions in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Action1,
        Self::Action2,
        Self::Action3,
        Self::Action4,
        Self::Action5,
        Self::Action6,
        Self::Action7,
        Self::Action8,
        Self::Action9,
        Self::Action10,
        Self::Action11,
        Self::Action12,
        Self::Action13,
    ];

    /// Returns the canonical wire name (`ACTION1` .. `ACTION13`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action1 => "ACTION1",
            Self::Action2 => "ACTION2",
            Self::Action3 => "ACTION3",
            Self::Action4 => "ACTION4",
            Self::Action5 => "ACTION5",
            Self::Action6 => "ACTION6",
            Self::Action7 => "ACTION7",
            Self::Action8 => "ACTION8",
            Self::Action9 => "ACTION9",
            Self::Action10 => "ACTION10",
            Self::Action11 => "ACTION11",
            Self::Action12 => "ACTION12",
            Self::Action13 => "ACTION13",
        }
    }

    /// Returns the 1-based action number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Action1 => 1,
            Self::Action2 => 2,
            Self::Action3 => 3,
            Self::Action4 => 4,
            Self::Action5 => 5,
            Self::Action6 => 6,
            Self::Action7 => 7,
            Self::Action8 => 8,
            Self::Action9 => 9,
            Self::Action10 => 10,
            Self::Action11 => 11,
            Self::Action12 => 12,
            Self::Action13 => 13,
        }
    }

    /// Returns the zero-based position in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardAction {
    type Err = UnknownActionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownActionError::new(value))
    }
}

impl TryFrom<u8> for CardAction {
    type Error = UnknownActionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|action| action.number() == value)
            .ok_or_else(|| UnknownActionError::new(value.to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Input did not name a recognized card action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card action: {input}")]
pub struct UnknownActionError {
    /// Rejected input.
    input: String,
}

impl UnknownActionError {
    /// Creates an error for the rejected input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}
