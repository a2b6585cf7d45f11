//! HTTP DTOs for intake endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{
    AdvanceTurnCommand, AdvanceTurnResult, AnalyzeSampleCaseResult, GetSessionStateResult,
    ResetSessionResult,
};
use crate::domain::foundation::Timestamp;
use crate::domain::intake::{CollectedData, StepId};

/// Message that forces a brand-new session, for older clients.
const FORCE_NEW_SESSION_MESSAGE: &str = "FORCE_NEW_SESSION";
const PING_MESSAGE: &str = "ping";
pub const PING_RESPONSE: &str = "Case intake service is running";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to advance an intake conversation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, alias = "question")]
    pub message: Option<String>,
    #[serde(default)]
    pub force_new_session: bool,
    #[serde(default)]
    pub reset_conversation: bool,
    /// Sets both `force_new_session` and `reset_conversation`.
    #[serde(default, rename = "forceReset")]
    pub force_reset: bool,
}

/// What a turn request asks for once its compatibility flags are applied
#[derive(Debug, Clone)]
pub enum TurnIntent {
    /// Liveness probe; no session is touched.
    Ping,
    Advance(AdvanceTurnCommand),
}

impl TurnRequest {
    pub fn into_intent(self) -> TurnIntent {
        let mut message = self.message.unwrap_or_default();
        if message.trim() == PING_MESSAGE {
            return TurnIntent::Ping;
        }

        let mut force_new_session = self.force_new_session || self.force_reset;
        let mut reset_conversation = self.reset_conversation || self.force_reset;
        if message.trim() == FORCE_NEW_SESSION_MESSAGE {
            force_new_session = true;
            reset_conversation = true;
            message.clear();
        }

        TurnIntent::Advance(AdvanceTurnCommand {
            session_id: self.session_id,
            message,
            force_new_session,
            reset_conversation,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for one turn
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub response: String,
    pub is_collecting_info: bool,
    pub current_step: StepId,
    pub error: Option<String>,
    pub collected_data: CollectedData,
}

impl From<AdvanceTurnResult> for TurnResponse {
    fn from(result: AdvanceTurnResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            response: result.response,
            is_collecting_info: result.is_collecting_info,
            current_step: result.current_step,
            error: result.error,
            collected_data: result.collected_data,
        }
    }
}

/// Response to a ping turn
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub response: String,
    pub status: String,
}

impl PingResponse {
    pub fn running() -> Self {
        Self {
            response: PING_RESPONSE.to_string(),
            status: "healthy".to_string(),
        }
    }
}

/// Response for getting session state
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub current_step: StepId,
    pub prompt: String,
    pub is_collecting_info: bool,
    pub analysis_in_flight: bool,
    pub collected_data: CollectedData,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
}

impl From<GetSessionStateResult> for SessionStateResponse {
    fn from(result: GetSessionStateResult) -> Self {
        let state = result.state;
        Self {
            session_id: state.session_id.to_string(),
            is_collecting_info: state.is_collecting(),
            current_step: state.current_step,
            prompt: result.prompt.to_string(),
            analysis_in_flight: state.analysis_in_flight,
            collected_data: state.collected_data,
            created_at: state.created_at,
            last_updated: state.last_updated,
        }
    }
}

/// Response for resetting a session
#[derive(Debug, Clone, Serialize)]
pub struct ResetSessionResponse {
    pub previous_session_id: String,
    pub session_id: String,
    pub current_step: StepId,
    pub response: String,
    pub message: String,
}

impl From<ResetSessionResult> for ResetSessionResponse {
    fn from(result: ResetSessionResult) -> Self {
        Self {
            previous_session_id: result.previous_session_id.to_string(),
            session_id: result.session_id.to_string(),
            current_step: result.current_step,
            response: result.prompt.to_string(),
            message: "Conversation reset successfully".to_string(),
        }
    }
}

/// Response for the sample case analysis
#[derive(Debug, Clone, Serialize)]
pub struct SampleCaseResponse {
    pub case_details: CollectedData,
    pub analysis: String,
}

impl From<AnalyzeSampleCaseResult> for SampleCaseResponse {
    fn from(result: AnalyzeSampleCaseResult) -> Self {
        Self {
            case_details: result.case,
            analysis: result.analysis,
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_GATEWAY".to_string(),
            message: message.into(),
        }
    }
}
