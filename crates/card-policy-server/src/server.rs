// card-policy-server/src/server.rs
// ============================================================================
// Module: Card Policy HTTP Server
// Description: HTTP routes for card eligibility queries.
// Purpose: Expose the eligibility evaluator over HTTP via axum.
// Dependencies: card-policy-core, card-policy-config, axum, tokio, time
// ============================================================================

//! ## Overview
//! The server exposes three routes:
//! - `GET /api/card/actions` looks a card up for a user and returns its
//!   allowed actions.
//! - `POST /api/card/evaluate` evaluates a caller-supplied card snapshot.
//! - `GET /health` reports liveness.
//!
//! Request inputs are untrusted. Each handler delegates to a synchronous
//! function returning a status and JSON body, and records exactly one audit
//! event per request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::body::to_bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use card_policy_config::CardPolicyConfig;
use card_policy_core::Card;
use card_policy_core::CardAction;
use card_policy_core::CardDirectory;
use card_policy_core::CardNumber;
use card_policy_core::CardStatus;
use card_policy_core::CardType;
use card_policy_core::EligibilityError;
use card_policy_core::EligibilityEvaluator;
use card_policy_core::RuleCatalog;
use card_policy_core::UserId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::net::TcpListener;

use crate::audit::AuditOutcome;
use crate::audit::AuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::build_audit_sink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Card lookup route.
pub const ACTIONS_ROUTE: &str = "/api/card/actions";
/// Snapshot evaluation route.
pub const EVALUATE_ROUTE: &str = "/api/card/evaluate";
/// Liveness route.
pub const HEALTH_ROUTE: &str = "/health";

// ============================================================================
// SECTION: Server
// ============================================================================

/// Card policy HTTP server instance.
pub struct CardPolicyServer {
    /// Address to bind.
    bind: SocketAddr,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl CardPolicyServer {
    /// Builds a new server from configuration.
    ///
    /// The rule catalog is verified before anything else is constructed, so a
    /// broken catalog prevents startup.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when initialization fails.
    pub fn from_config(config: &CardPolicyConfig) -> Result<Self, ServerError> {
        RuleCatalog::standard().verify().map_err(|err| ServerError::Init(err.to_string()))?;
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let audit =
            build_audit_sink(&config.audit).map_err(|err| ServerError::Init(err.to_string()))?;
        let directory = Arc::new(config.card_directory());
        Ok(Self {
            bind,
            state: Arc::new(ServerState::new(directory, audit, config.server.max_body_bytes)),
        })
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Returns the axum router serving all routes.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        self.serve_on(listener).await
    }

    /// Serves requests on an already bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when serving fails.
    pub async fn serve_on(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.router();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the router over shared state.
///
/// The framework body limit is disabled; the evaluate handler enforces
/// `max_body_bytes` itself so oversized bodies are audited.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(ACTIONS_ROUTE, get(handle_actions))
        .route(EVALUATE_ROUTE, post(handle_evaluate))
        .route(HEALTH_ROUTE, get(handle_health))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Shared server state for HTTP handlers.
struct ServerState {
    /// Source of card snapshots.
    directory: Arc<dyn CardDirectory>,
    /// Audit sink for request events.
    audit: Arc<dyn AuditSink>,
    /// Evaluator over the standard catalog.
    evaluator: EligibilityEvaluator<'static>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

impl ServerState {
    /// Creates handler state over the standard catalog.
    fn new(
        directory: Arc<dyn CardDirectory>,
        audit: Arc<dyn AuditSink>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            directory,
            audit,
            evaluator: EligibilityEvaluator::standard(),
            max_body_bytes,
        }
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles card lookup requests.
async fn handle_actions(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<ActionsQuery>, QueryRejection>,
) -> impl IntoResponse {
    let (status, body) = match query {
        Ok(Query(query)) => actions_response(&state, &query),
        Err(rejection) => {
            let err = ApiError::BadRequest(format!(
                "invalid query string: {}",
                rejection.body_text()
            ));
            respond_err(&state, ACTIONS_ROUTE, RequestSubject::default(), &err)
        }
    };
    (status, Json(body))
}

/// Handles snapshot evaluation requests.
async fn handle_evaluate(State(state): State<Arc<ServerState>>, body: Body) -> impl IntoResponse {
    let (status, payload) = match to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => evaluate_response(&state, &bytes),
        Err(_) => {
            respond_err(&state, EVALUATE_ROUTE, RequestSubject::default(), &ApiError::TooLarge)
        }
    };
    (status, Json(payload))
}

/// Handles liveness probes.
async fn handle_health(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    record(&state, HEALTH_ROUTE, StatusCode::OK, AuditOutcome::Ok, RequestSubject::default());
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

// ============================================================================
// SECTION: Card Lookup
// ============================================================================

/// Query parameters for the card lookup route.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionsQuery {
    /// Requesting user.
    user_id: Option<String>,
    /// Requested card.
    card_number: Option<String>,
}

/// Successful card lookup response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionsResponse {
    /// Requesting user.
    user_id: UserId,
    /// Requested card.
    card_number: CardNumber,
    /// Allowed actions in catalog order.
    allowed_actions: Vec<CardAction>,
    /// Number of allowed actions.
    actions_count: usize,
    /// Response timestamp (RFC 3339, UTC).
    requested_at: String,
}

/// Resolves a card lookup request to a status and JSON body.
fn actions_response(state: &ServerState, query: &ActionsQuery) -> (StatusCode, Value) {
    let user_id = non_blank(query.user_id.as_deref()).map(UserId::new);
    let card_number = non_blank(query.card_number.as_deref()).map(CardNumber::new);
    let mut subject = RequestSubject {
        user_id: user_id.as_ref(),
        card_number: card_number.as_ref(),
        actions_count: None,
    };
    let result = match (&user_id, &card_number) {
        (None, _) => Err(ApiError::BadRequest("UserId cannot be empty".to_string())),
        (Some(_), None) => Err(ApiError::BadRequest("CardNumber cannot be empty".to_string())),
        (Some(user_id), Some(card_number)) => lookup_actions(state, user_id, card_number),
    };
    match result {
        Ok(response) => {
            subject.actions_count = Some(response.actions_count);
            respond_ok(state, ACTIONS_ROUTE, subject, &response)
        }
        Err(err) => respond_err(state, ACTIONS_ROUTE, subject, &err),
    }
}

/// Fetches a card and evaluates its allowed actions.
fn lookup_actions(
    state: &ServerState,
    user_id: &UserId,
    card_number: &CardNumber,
) -> Result<ActionsResponse, ApiError> {
    let card = state
        .directory
        .card_details(user_id, card_number)
        .map_err(|err| ApiError::Internal(err.to_string()))?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Card {card_number} for user {user_id} not found"))
        })?;
    let eligibility = state.evaluator.evaluate(Some(&card))?;
    Ok(ActionsResponse {
        user_id: user_id.clone(),
        card_number: card_number.clone(),
        allowed_actions: eligibility.actions,
        actions_count: eligibility.count,
        requested_at: rfc3339_now()?,
    })
}

// ============================================================================
// SECTION: Snapshot Evaluation
// ============================================================================

/// Body of a snapshot evaluation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateRequest {
    /// Card snapshot; absent or null is rejected.
    #[serde(default)]
    card: Option<CardPayload>,
    /// Optional action to test individually.
    #[serde(default)]
    action: Option<String>,
}

/// Caller-supplied card snapshot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardPayload {
    /// Card number.
    card_number: String,
    /// Product family.
    card_type: CardType,
    /// Lifecycle status.
    card_status: CardStatus,
    /// Whether a PIN has been provisioned.
    is_pin_set: bool,
}

impl From<CardPayload> for Card {
    fn from(payload: CardPayload) -> Self {
        Self::new(payload.card_number, payload.card_type, payload.card_status, payload.is_pin_set)
    }
}

/// Successful snapshot evaluation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateResponse {
    /// Allowed actions in catalog order.
    allowed_actions: Vec<CardAction>,
    /// Number of allowed actions.
    actions_count: usize,
    /// Action tested individually, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<CardAction>,
    /// Whether the requested action is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    action_allowed: Option<bool>,
}

/// Resolves a snapshot evaluation request to a status and JSON body.
fn evaluate_response(state: &ServerState, bytes: &Bytes) -> (StatusCode, Value) {
    if bytes.len() > state.max_body_bytes {
        return respond_err(state, EVALUATE_ROUTE, RequestSubject::default(), &ApiError::TooLarge);
    }
    let request: EvaluateRequest = match serde_json::from_slice(bytes.as_ref()) {
        Ok(request) => request,
        Err(err) => {
            let err = ApiError::BadRequest(format!("invalid request body: {err}"));
            return respond_err(state, EVALUATE_ROUTE, RequestSubject::default(), &err);
        }
    };
    let card = request.card.map(Card::from);
    let subject = RequestSubject {
        user_id: None,
        card_number: card.as_ref().map(Card::card_number),
        actions_count: None,
    };
    match evaluate_snapshot(state, card.as_ref(), request.action.as_deref()) {
        Ok(response) => {
            let subject = RequestSubject {
                actions_count: Some(response.actions_count),
                ..subject
            };
            respond_ok(state, EVALUATE_ROUTE, subject, &response)
        }
        Err(err) => respond_err(state, EVALUATE_ROUTE, subject, &err),
    }
}

/// Evaluates a caller-supplied snapshot.
fn evaluate_snapshot(
    state: &ServerState,
    card: Option<&Card>,
    action: Option<&str>,
) -> Result<EvaluateResponse, ApiError> {
    let eligibility = state.evaluator.evaluate(card)?;
    let action = action
        .map(|name| name.parse::<CardAction>().map_err(EligibilityError::from))
        .transpose()?;
    let action_allowed = action.map(|action| eligibility.actions.contains(&action));
    Ok(EvaluateResponse {
        allowed_actions: eligibility.actions,
        actions_count: eligibility.count,
        action,
        action_allowed,
    })
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Identifying fields recorded with a request.
#[derive(Debug, Clone, Copy, Default)]
struct RequestSubject<'a> {
    /// User identifier when known.
    user_id: Option<&'a UserId>,
    /// Card number when known.
    card_number: Option<&'a CardNumber>,
    /// Allowed-action count when evaluated.
    actions_count: Option<usize>,
}

/// Request failures mapped to HTTP responses.
#[derive(Debug, Error)]
enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    BadRequest(String),
    /// Card not found for the user.
    #[error("{0}")]
    NotFound(String),
    /// Request body exceeds the configured limit.
    #[error("request body too large")]
    TooLarge,
    /// Unexpected failure inside the service.
    #[error("{0}")]
    Internal(String),
}

impl From<EligibilityError> for ApiError {
    fn from(err: EligibilityError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl ApiError {
    /// Returns the HTTP status and audit outcome for the error.
    const fn classify(&self) -> (StatusCode, AuditOutcome) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, AuditOutcome::Rejected),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, AuditOutcome::NotFound),
            Self::TooLarge => (StatusCode::PAYLOAD_TOO_LARGE, AuditOutcome::Rejected),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, AuditOutcome::Error),
        }
    }

    /// Renders the JSON error body.
    fn body(&self) -> Value {
        match self {
            Self::Internal(details) => {
                json!({ "error": "Internal server error", "details": details })
            }
            Self::BadRequest(_) | Self::NotFound(_) | Self::TooLarge => {
                json!({ "error": self.to_string() })
            }
        }
    }
}

/// Serializes a success body and records the request.
fn respond_ok(
    state: &ServerState,
    route: &'static str,
    subject: RequestSubject<'_>,
    body: &impl Serialize,
) -> (StatusCode, Value) {
    match serde_json::to_value(body) {
        Ok(value) => {
            record(state, route, StatusCode::OK, AuditOutcome::Ok, subject);
            (StatusCode::OK, value)
        }
        Err(err) => respond_err(state, route, subject, &ApiError::Internal(err.to_string())),
    }
}

/// Renders an error body and records the request.
fn respond_err(
    state: &ServerState,
    route: &'static str,
    subject: RequestSubject<'_>,
    err: &ApiError,
) -> (StatusCode, Value) {
    let (status, outcome) = err.classify();
    record(state, route, status, outcome, subject);
    (status, err.body())
}

/// Records one audit event.
fn record(
    state: &ServerState,
    route: &'static str,
    status: StatusCode,
    outcome: AuditOutcome,
    subject: RequestSubject<'_>,
) {
    state.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
        route,
        outcome,
        status: status.as_u16(),
        user_id: subject.user_id,
        card_number: subject.card_number,
        actions_count: subject.actions_count,
    }));
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the value unchanged when it is present and not blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Formats the current UTC time as RFC 3339.
fn rfc3339_now() -> Result<String, ApiError> {
    OffsetDateTime::now_utc().format(&Rfc3339).map_err(|err| ApiError::Internal(err.to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server startup and transport errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization failures.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
