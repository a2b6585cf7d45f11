//! Intake domain: the step table, field validation and per-session state.
//!
//! A session walks the step table from `greeting` to `analysis`, storing one
//! normalized answer per step.

mod case_field;
mod conversation_state;
mod errors;
mod step;
mod validation;

pub use case_field::{CaseField, CollectedData};
pub use conversation_state::ConversationState;
pub use errors::IntakeError;
pub use step::{step_by_id, steps, StepDefinition, StepId, UnknownStep, ValidationKind};
pub use validation::{validate, validate_at, RejectedInput};
