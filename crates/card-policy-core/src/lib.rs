// card-policy-core/src/lib.rs
// ============================================================================
// Module: Card Policy Core Library
// Description: Public API surface for the card action eligibility engine.
// Purpose: Expose card types, the rule catalog, and the evaluator.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Card Policy core answers one question: given a card's identity and state,
//! which of a fixed catalog of actions is currently permitted on it. It is
//! pure and stateless; card lookup, transport, and presentation live in the
//! surrounding crates and integrate through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::CardDirectory;
pub use interfaces::CardLookupError;
pub use runtime::CatalogError;
pub use runtime::Eligibility;
pub use runtime::EligibilityError;
pub use runtime::EligibilityEvaluator;
pub use runtime::InMemoryCardDirectory;
pub use runtime::Predicate;
pub use runtime::RuleCatalog;
pub use runtime::RuleEntry;
pub use runtime::RuleNotFoundError;
