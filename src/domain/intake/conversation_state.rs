//! Conversation State Entity
//!
//! Tracks where one intake session stands in the step table and what it has
//! collected so far.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

use super::case_field::CollectedData;
use super::step::{StepDefinition, StepId};
use super::validation::{validate, RejectedInput};

/// Mutable state of one intake session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: SessionId,
    pub current_step: StepId,
    pub collected_data: CollectedData,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
    /// Set while an analysis triggered by this session is running.
    pub analysis_in_flight: bool,
    /// Bumped by every analysis start and every reset; an analysis may only
    /// clear the in-flight flag while its own generation is still current.
    #[serde(default)]
    pub analysis_generation: u64,
}

impl ConversationState {
    /// Creates a session positioned at the initial step with no answers.
    pub fn new(session_id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            session_id,
            current_step: StepId::INITIAL,
            collected_data: CollectedData::new(),
            created_at: now,
            last_updated: now,
            analysis_in_flight: false,
            analysis_generation: 0,
        }
    }

    /// Definition of the step currently awaiting an answer.
    pub fn current_definition(&self) -> &'static StepDefinition {
        self.current_step.definition()
    }

    /// Prompt for the current step.
    pub fn prompt(&self) -> &'static str {
        self.current_definition().prompt
    }

    /// True until the terminal step is reached.
    pub fn is_collecting(&self) -> bool {
        !self.current_step.is_terminal()
    }

    /// Validates an answer for the current step, stores it and advances.
    ///
    /// A rejected answer leaves the state untouched. Returns the step that is
    /// current afterwards.
    pub fn apply_answer(&mut self, raw: &str) -> Result<StepId, RejectedInput> {
        let step = self.current_definition();
        let value = validate(raw, step.validation)?;

        if let Some(field) = step.field {
            self.collected_data.insert(field, value);
        }
        if let Some(next) = step.next {
            self.current_step = next;
        }
        self.touch();
        Ok(self.current_step)
    }

    /// Marks an analysis as running and returns its generation, or `None`
    /// when one is already in flight.
    pub fn begin_analysis(&mut self) -> Option<u64> {
        if self.analysis_in_flight {
            return None;
        }
        self.analysis_in_flight = true;
        self.analysis_generation += 1;
        Some(self.analysis_generation)
    }

    /// Clears the in-flight flag if `generation` is still the current one.
    ///
    /// An analysis outlived by a reset finishes without touching the flag of
    /// whatever analysis started after it.
    pub fn finish_analysis(&mut self, generation: u64) -> bool {
        if self.analysis_generation != generation {
            return false;
        }
        self.analysis_in_flight = false;
        true
    }

    /// Returns to the initial step and clears all answers, keeping the id.
    pub fn reset(&mut self) {
        self.current_step = StepId::INITIAL;
        self.collected_data.clear();
        self.analysis_in_flight = false;
        self.analysis_generation += 1;
        self.touch();
    }

    /// Refreshes `last_updated`.
    pub fn touch(&mut self) {
        self.last_updated = Timestamp::now();
    }
}
