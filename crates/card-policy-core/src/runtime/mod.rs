// card-policy-core/src/runtime/mod.rs
// ============================================================================
// Module: Card Policy Runtime
// Description: Rule catalog, eligibility evaluation, and card directory.
// Purpose: Apply the card-lifecycle policy to card snapshots.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the rule catalog and the stateless evaluator that
//! applies it. All surfaces (HTTP, CLI) call the same evaluator so their
//! answers cannot drift apart.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod directory;
pub mod evaluator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogError;
pub use catalog::Predicate;
pub use catalog::RuleCatalog;
pub use catalog::RuleEntry;
pub use catalog::RuleNotFoundError;
pub use catalog::standard_entry;
pub use directory::InMemoryCardDirectory;
pub use evaluator::Eligibility;
pub use evaluator::EligibilityError;
pub use evaluator::EligibilityEvaluator;
