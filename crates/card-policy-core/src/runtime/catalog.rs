// card-policy-core/src/runtime/catalog.rs
// ============================================================================
// Module: Rule Catalog
// Description: The card-lifecycle policy as one predicate per card action.
// Purpose: Hold a complete, immutable action-to-predicate table.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The rule catalog maps every [`CardAction`] to exactly one [`Predicate`]
//! over a [`Card`] snapshot. The standard catalog is derived from an
//! exhaustive `match` over the action enumeration, so adding an action without
//! a rule fails to compile. Catalogs assembled from arbitrary entry lists are
//! checked for missing and duplicate rules at construction time.
//!
//! Catalogs are never mutated after construction and iterate in action
//! declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use thiserror::Error;

use crate::core::Card;
use crate::core::CardAction;
use crate::core::CardStatus;
use crate::core::CardType;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Eligibility rule for a single action.
pub type Predicate = fn(&Card) -> bool;

/// One catalog row: an action, its predicate, and a readable rule summary.
#[derive(Debug, Clone, Copy)]
pub struct RuleEntry {
    /// Action governed by this rule.
    action: CardAction,
    /// Predicate deciding eligibility.
    predicate: Predicate,
    /// Human-readable rule summary.
    summary: &'static str,
}

impl RuleEntry {
    /// Creates a catalog entry.
    #[must_use]
    pub const fn new(action: CardAction, predicate: Predicate, summary: &'static str) -> Self {
        Self {
            action,
            predicate,
            summary,
        }
    }

    /// Returns the governed action.
    #[must_use]
    pub const fn action(&self) -> CardAction {
        self.action
    }

    /// Returns the predicate.
    #[must_use]
    pub const fn predicate(&self) -> Predicate {
        self.predicate
    }

    /// Returns the rule summary.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        self.summary
    }

    /// Applies the predicate to a card.
    #[must_use]
    pub fn evaluate(&self, card: &Card) -> bool {
        (self.predicate)(card)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog construction failures (startup faults).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An action has no rule.
    #[error("no rule defined for {0}")]
    MissingRule(CardAction),
    /// An action has more than one rule.
    #[error("more than one rule defined for {0}")]
    DuplicateRule(CardAction),
}

/// The catalog holds no rule for the requested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no rule found for {action}")]
pub struct RuleNotFoundError {
    /// Requested action.
    pub action: CardAction,
}

// ============================================================================
// SECTION: Rule Catalog
// ============================================================================

/// Process-wide standard catalog.
static STANDARD_CATALOG: LazyLock<RuleCatalog> = LazyLock::new(|| RuleCatalog {
    entries: CardAction::ALL.into_iter().map(standard_entry).collect(),
});

/// Complete, immutable mapping from card action to eligibility predicate.
///
/// # Invariants
/// - Holds exactly one entry per [`CardAction`], stored at the action's
///   declaration index.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    /// Entries in action declaration order.
    entries: Vec<RuleEntry>,
}

impl RuleCatalog {
    /// Returns the standard card-lifecycle catalog.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_CATALOG
    }

    /// Builds a catalog from an arbitrary entry list.
    ///
    /// Input order is irrelevant; the catalog always iterates in action
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateRule`] when an action appears twice and
    /// [`CatalogError::MissingRule`] when an action has no entry.
    pub fn from_entries(entries: impl IntoIterator<Item = RuleEntry>) -> Result<Self, CatalogError> {
        let mut slots: [Option<RuleEntry>; CardAction::COUNT] = [None; CardAction::COUNT];
        for entry in entries {
            let slot = &mut slots[entry.action.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateRule(entry.action));
            }
            *slot = Some(entry);
        }
        let mut ordered = Vec::with_capacity(CardAction::COUNT);
        for (action, slot) in CardAction::ALL.into_iter().zip(slots) {
            ordered.push(slot.ok_or(CatalogError::MissingRule(action))?);
        }
        Ok(Self {
            entries: ordered,
        })
    }

    /// Re-checks the completeness invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when an action is missing or out of place.
    pub fn verify(&self) -> Result<(), CatalogError> {
        for action in CardAction::ALL {
            match self.entries.get(action.index()) {
                Some(entry) if entry.action == action => {}
                Some(_) | None => return Err(CatalogError::MissingRule(action)),
            }
        }
        if let Some(extra) = self.entries.get(CardAction::COUNT) {
            return Err(CatalogError::DuplicateRule(extra.action));
        }
        Ok(())
    }

    /// Returns the predicate registered for an action.
    ///
    /// # Errors
    ///
    /// Returns [`RuleNotFoundError`] when the catalog has no entry for the action.
    pub fn lookup(&self, action: CardAction) -> Result<Predicate, RuleNotFoundError> {
        self.entry(action).map(RuleEntry::predicate).ok_or(RuleNotFoundError {
            action,
        })
    }

    /// Returns the full entry for an action, if present.
    #[must_use]
    pub fn entry(&self, action: CardAction) -> Option<&RuleEntry> {
        self.entries.get(action.index()).filter(|entry| entry.action == action)
    }

    /// Returns the entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Returns the catalog keys in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = CardAction> + '_ {
        self.entries.iter().map(RuleEntry::action)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Standard Rules
// ============================================================================

/// Returns the standard rule for an action.
///
/// The exhaustive match is the structural completeness check.
#[must_use]
pub const fn standard_entry(action: CardAction) -> RuleEntry {
    match action {
        CardAction::Action1 => RuleEntry::new(action, is_active, "status is Active"),
        CardAction::Action2 => RuleEntry::new(action, is_inactive, "status is Inactive"),
        CardAction::Action3 | CardAction::Action4 | CardAction::Action9 => {
            RuleEntry::new(action, always, "always allowed")
        }
        CardAction::Action5 => RuleEntry::new(action, is_credit, "card type is Credit"),
        CardAction::Action6 => RuleEntry::new(
            action,
            has_pin_while_open,
            "status is Ordered, Inactive, Active or Blocked, and a PIN is set",
        ),
        CardAction::Action7 => RuleEntry::new(
            action,
            needs_pin_or_blocked_with_pin,
            "status is Ordered, Inactive or Active with no PIN set, or Blocked with a PIN set",
        ),
        CardAction::Action8 => RuleEntry::new(
            action,
            is_open_or_blocked,
            "status is Ordered, Inactive, Active or Blocked",
        ),
        CardAction::Action10 | CardAction::Action12 | CardAction::Action13 => {
            RuleEntry::new(action, is_open, "status is Ordered, Inactive or Active")
        }
        CardAction::Action11 => {
            RuleEntry::new(action, is_delivered_and_open, "status is Inactive or Active")
        }
    }
}

/// Card is active.
fn is_active(card: &Card) -> bool {
    card.card_status() == CardStatus::Active
}

/// Card is delivered but not activated.
fn is_inactive(card: &Card) -> bool {
    card.card_status() == CardStatus::Inactive
}

/// Unconditional rule.
const fn always(_card: &Card) -> bool {
    true
}

/// Card is a credit card, whatever its status.
fn is_credit(card: &Card) -> bool {
    card.card_type() == CardType::Credit
}

/// Card is ordered, inactive, or active.
const fn is_open(card: &Card) -> bool {
    matches!(card.card_status(), CardStatus::Ordered | CardStatus::Inactive | CardStatus::Active)
}

/// Card is inactive or active.
const fn is_delivered_and_open(card: &Card) -> bool {
    matches!(card.card_status(), CardStatus::Inactive | CardStatus::Active)
}

/// Card is open or blocked.
const fn is_open_or_blocked(card: &Card) -> bool {
    is_open(card) || matches!(card.card_status(), CardStatus::Blocked)
}

/// PIN is set on an open or blocked card.
const fn has_pin_while_open(card: &Card) -> bool {
    match card.card_status() {
        CardStatus::Ordered | CardStatus::Inactive | CardStatus::Active | CardStatus::Blocked => {
            card.is_pin_set()
        }
        CardStatus::Restricted | CardStatus::Expired | CardStatus::Closed => false,
    }
}

/// Open card without a PIN, or blocked card with one.
///
/// Not the complement of [`has_pin_while_open`] on blocked cards: both rules
/// hold for a blocked card with a PIN and neither holds without one.
const fn needs_pin_or_blocked_with_pin(card: &Card) -> bool {
    match card.card_status() {
        CardStatus::Ordered | CardStatus::Inactive | CardStatus::Active => !card.is_pin_set(),
        CardStatus::Blocked => card.is_pin_set(),
        CardStatus::Restricted | CardStatus::Expired | CardStatus::Closed => false,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
