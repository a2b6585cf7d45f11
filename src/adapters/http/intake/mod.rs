//! HTTP adapter for the case intake conversation.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, PingResponse, ResetSessionResponse, SampleCaseResponse, SessionStateResponse,
    TurnIntent, TurnRequest, TurnResponse, PING_RESPONSE,
};
pub use handlers::{
    analyze_sample_case, get_session_state, post_message, reset_session, IntakeAppState,
};
pub use routes::routes as intake_routes;
