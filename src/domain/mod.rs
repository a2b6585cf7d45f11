//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session ids, timestamps)
//! - `intake` - Step table, field validation and conversation state

pub mod foundation;
pub mod intake;
