//! Route definitions for intake endpoints

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    analyze_sample_case, get_session_state, post_message, reset_session, IntakeAppState,
};

/// Create intake router with all endpoints
///
/// # Endpoints
///
/// - `POST /api/intake/messages` - Advance a conversation by one turn
/// - `GET /api/intake/sessions/{session_id}` - Get session state
/// - `POST /api/intake/sessions/{session_id}/reset` - Reset a session
/// - `GET /api/intake/sample` - Analyze the built-in sample case
pub fn routes() -> Router<IntakeAppState> {
    Router::new()
        .route("/api/intake/messages", post(post_message))
        .route("/api/intake/sessions/:session_id", get(get_session_state))
        .route(
            "/api/intake/sessions/:session_id/reset",
            post(reset_session),
        )
        .route("/api/intake/sample", get(analyze_sample_case))
}
