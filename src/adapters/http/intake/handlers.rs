//! HTTP handlers for intake endpoints
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    AdvanceTurnError, AdvanceTurnHandler, AnalyzeSampleCaseHandler, GetSessionStateError,
    GetSessionStateHandler, GetSessionStateQuery, ResetSessionCommand, ResetSessionError,
    ResetSessionHandler,
};
use crate::domain::foundation::SessionId;
use crate::ports::{CaseAnalyzer, SessionStore};

use super::dto::{
    ErrorResponse, PingResponse, ResetSessionResponse, SampleCaseResponse, SessionStateResponse,
    TurnIntent, TurnRequest, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct IntakeAppState {
    pub store: Arc<dyn SessionStore>,
    pub analyzer: Arc<dyn CaseAnalyzer>,
}

impl IntakeAppState {
    pub fn new(store: Arc<dyn SessionStore>, analyzer: Arc<dyn CaseAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    pub fn advance_turn_handler(&self) -> AdvanceTurnHandler {
        AdvanceTurnHandler::new(self.store.clone(), self.analyzer.clone())
    }

    pub fn get_session_state_handler(&self) -> GetSessionStateHandler {
        GetSessionStateHandler::new(self.store.clone())
    }

    pub fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.store.clone())
    }

    pub fn analyze_sample_case_handler(&self) -> AnalyzeSampleCaseHandler {
        AnalyzeSampleCaseHandler::new(self.analyzer.clone())
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, (StatusCode, Json<ErrorResponse>)> {
    SessionId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session_id format")),
        )
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Advance an intake conversation by one turn
///
/// POST /api/intake/messages
///
/// Validation and analysis failures are reported in the `error` field of a
/// 200 response.
pub async fn post_message(
    State(app_state): State<IntakeAppState>,
    Json(req): Json<TurnRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let cmd = match req.into_intent() {
        TurnIntent::Ping => return Ok(Json(PingResponse::running()).into_response()),
        TurnIntent::Advance(cmd) => cmd,
    };

    let handler = app_state.advance_turn_handler();
    let result = handler.handle(cmd).await.map_err(|e| match e {
        AdvanceTurnError::SessionNotFound(id) => {
            tracing::error!(session_id = %id, "Session vanished during turn");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Session", &id.to_string())),
            )
        }
    })?;

    Ok(Json(TurnResponse::from(result)).into_response())
}

/// Get the state of an intake session
///
/// GET /api/intake/sessions/{session_id}
pub async fn get_session_state(
    State(app_state): State<IntakeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.get_session_state_handler();
    let result = handler
        .handle(GetSessionStateQuery { session_id })
        .await
        .map_err(|e| match e {
            GetSessionStateError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Session", &id.to_string())),
            ),
        })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(SessionStateResponse::from(result)),
    ))
}

/// Discard a session and start over in a new one
///
/// POST /api/intake/sessions/{session_id}/reset
pub async fn reset_session(
    State(app_state): State<IntakeAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let session_id = parse_session_id(&session_id)?;

    let handler = app_state.reset_session_handler();
    let result = handler
        .handle(ResetSessionCommand { session_id })
        .await
        .map_err(|e| match e {
            ResetSessionError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Session", &id.to_string())),
            ),
        })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(ResetSessionResponse::from(result)),
    ))
}

/// Analyze the built-in sample case
///
/// GET /api/intake/sample
pub async fn analyze_sample_case(
    State(app_state): State<IntakeAppState>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.analyze_sample_case_handler();
    let result = handler.handle().await.map_err(|e| {
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::bad_gateway(e.to_string())),
        )
    })?;

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((
        StatusCode::OK,
        Json(SampleCaseResponse::from(result)),
    ))
}
