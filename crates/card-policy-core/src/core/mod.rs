// card-policy-core/src/core/mod.rs
// ============================================================================
// Module: Card Policy Core Types
// Description: Card snapshots, identifiers, and the action enumeration.
// Purpose: Provide stable, serializable types shared by every policy surface.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types define what the rule engine reads (card snapshots) and what it
//! answers with (card actions). These types are the canonical source of truth
//! for derived surfaces (HTTP, CLI, configuration).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod action;
pub mod card;
pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::CardAction;
pub use action::UnknownActionError;
pub use card::Card;
pub use card::CardFieldError;
pub use card::CardStatus;
pub use card::CardType;
pub use identifiers::CardNumber;
pub use identifiers::UserId;
