// card-policy-server/src/audit.rs
// ============================================================================
// Module: Request Audit Logging
// Description: Structured audit events for card policy request handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: card-policy-config, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the audit event payload and sinks for HTTP request
//! logging. Events are written as one JSON object per line so deployments can
//! route them to their preferred logging pipeline. Card numbers are masked
//! before they reach an event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use card_policy_config::AuditConfig;
use card_policy_config::AuditSinkKind;
use card_policy_core::CardNumber;
use card_policy_core::UserId;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Redaction label attached to every request event.
const REDACTION_CARD_NUMBER_MASKED: &str = "card_number_masked";

/// Coarse request outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Request answered successfully.
    Ok,
    /// Request rejected as malformed or invalid.
    Rejected,
    /// Requested card does not exist for the user.
    NotFound,
    /// Request failed inside the service.
    Error,
}

/// Request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Route that handled the request.
    pub route: &'static str,
    /// Request outcome.
    pub outcome: AuditOutcome,
    /// HTTP status code returned.
    pub status: u16,
    /// User identifier when provided.
    pub user_id: Option<String>,
    /// Masked card number when provided.
    pub card_number: Option<String>,
    /// Number of allowed actions when evaluation succeeded.
    pub actions_count: Option<usize>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct a request audit event.
pub struct RequestAuditEventParams<'a> {
    /// Route that handled the request.
    pub route: &'static str,
    /// Request outcome.
    pub outcome: AuditOutcome,
    /// HTTP status code returned.
    pub status: u16,
    /// User identifier when provided.
    pub user_id: Option<&'a UserId>,
    /// Card number when provided; masked before recording.
    pub card_number: Option<&'a CardNumber>,
    /// Number of allowed actions when evaluation succeeded.
    pub actions_count: Option<usize>,
}

impl RequestAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams<'_>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "card_policy_request",
            timestamp_ms,
            route: params.route,
            outcome: params.outcome,
            status: params.status,
            user_id: params.user_id.map(ToString::to_string),
            card_number: params.card_number.map(CardNumber::masked),
            actions_count: params.actions_count,
            redaction: REDACTION_CARD_NUMBER_MASKED,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for request events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &RequestAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its log file.
pub fn build_audit_sink(config: &AuditConfig) -> io::Result<Arc<dyn AuditSink>> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
        AuditSinkKind::File => {
            let path = config.path.as_deref().map(str::trim).unwrap_or_default();
            if path.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "audit.path is required for the file sink",
                ));
            }
            Ok(Arc::new(FileAuditSink::new(Path::new(path))?))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use std::fs;

    use serde_json::Value;

    use super::*;

    fn sample_event() -> RequestAuditEvent {
        RequestAuditEvent::new(RequestAuditEventParams {
            route: "/api/card/actions",
            outcome: AuditOutcome::Ok,
            status: 200,
            user_id: Some(&UserId::from("user1")),
            card_number: Some(&CardNumber::from("4111111111111111")),
            actions_count: Some(10),
        })
    }

    #[test]
    fn event_masks_card_number() {
        let event = sample_event();
        assert_eq!(event.card_number.as_deref(), Some("************1111"));
        assert_eq!(event.redaction, "card_number_masked");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["outcome"], "ok");
        assert_eq!(value["actions_count"], 10);
    }

    #[test]
    fn event_masks_short_card_number_entirely() {
        let event = RequestAuditEvent::new(RequestAuditEventParams {
            route: "/api/card/actions",
            outcome: AuditOutcome::NotFound,
            status: 404,
            user_id: Some(&UserId::from("user1")),
            card_number: Some(&CardNumber::from("123")),
            actions_count: None,
        });
        assert_eq!(event.card_number.as_deref(), Some("***"));
        assert_eq!(event.redaction, "card_number_masked");
    }

    #[test]
    fn file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let sink = FileAuditSink::new(&path).unwrap();
        sink.record(&sample_event());
        sink.record(&sample_event());
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: Value = serde_json::from_str(line).expect("json line");
            assert_eq!(value["event"], "card_policy_request");
            assert_eq!(value["user_id"], "user1");
        }
    }

    #[test]
    fn build_audit_sink_opens_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let config = AuditConfig {
            sink: AuditSinkKind::File,
            path: Some(path.to_string_lossy().into_owned()),
        };
        let sink = build_audit_sink(&config).unwrap();
        sink.record(&sample_event());
        assert!(fs::read_to_string(&path).unwrap().contains("card_policy_request"));
    }

    #[test]
    fn build_audit_sink_requires_file_path() {
        let config = AuditConfig {
            sink: AuditSinkKind::File,
            path: None,
        };
        assert!(build_audit_sink(&config).is_err());
    }
}
