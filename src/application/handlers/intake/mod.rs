//! Intake Command and Query Handlers
//!
//! ## Commands
//! - `AdvanceTurn` - Process one turn of the intake conversation
//! - `ResetSession` - Discard a session and start a new one
//! - `AnalyzeSampleCase` - Analyze the built-in demonstration case
//!
//! ## Queries
//! - `GetSessionState` - Current step, prompt and collected answers

mod advance_turn;
mod analyze_sample_case;
mod get_session_state;
mod reset_session;

pub use advance_turn::{
    AdvanceTurnCommand, AdvanceTurnError, AdvanceTurnHandler, AdvanceTurnResult,
};
pub use analyze_sample_case::{
    sample_case, AnalyzeSampleCaseError, AnalyzeSampleCaseHandler, AnalyzeSampleCaseResult,
};
pub use get_session_state::{
    GetSessionStateError, GetSessionStateHandler, GetSessionStateQuery, GetSessionStateResult,
};
pub use reset_session::{
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
};
