// card-policy-server/src/lib.rs
// ============================================================================
// Module: Card Policy Server Library
// Description: HTTP presentation layer over the card eligibility engine.
// Purpose: Expose eligibility queries over HTTP with structured audit logging.
// Dependencies: card-policy-core, card-policy-config, axum, tokio
// ============================================================================

//! ## Overview
//! `card-policy-server` is thin glue: it validates request parameters, fetches
//! card snapshots through a [`card_policy_core::CardDirectory`], runs the
//! [`card_policy_core::EligibilityEvaluator`], and records one audit event per
//! request. All policy decisions stay in `card-policy-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditOutcome;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestAuditEventParams;
pub use audit::StderrAuditSink;
pub use audit::build_audit_sink;
pub use server::CardPolicyServer;
pub use server::ServerError;
