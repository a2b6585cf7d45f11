//! Foundation module - Shared domain primitives.
//!
//! Identifiers and time values used across the intake domain.

mod ids;
mod timestamp;

pub use ids::SessionId;
pub use timestamp::Timestamp;
