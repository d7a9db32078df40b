// card-policy-config/src/lib.rs
// ============================================================================
// Module: Card Policy Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for card-policy.toml semantics.
// Dependencies: card-policy-core, serde, toml
// ============================================================================

//! ## Overview
//! `card-policy-config` defines the configuration model for the card policy
//! service: HTTP transport settings, audit sink selection, and the card
//! records served by the in-memory directory. Loading is strict and
//! fail-closed; config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
