//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands change sessions, queries only read them.

pub mod handlers;

pub use handlers::intake::{
    AdvanceTurnCommand, AdvanceTurnError, AdvanceTurnHandler, AdvanceTurnResult,
    AnalyzeSampleCaseError, AnalyzeSampleCaseHandler, AnalyzeSampleCaseResult,
    GetSessionStateError, GetSessionStateHandler, GetSessionStateQuery, GetSessionStateResult,
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
};
