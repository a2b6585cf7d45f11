//! AdvanceTurnHandler - Process one free-text turn of an intake conversation

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{CollectedData, ConversationState, IntakeError, StepId};
use crate::ports::{CaseAnalyzer, SessionHandle, SessionStore, SessionStoreError};

/// Texts that restart the conversation, compared case-insensitively.
const RESET_COMMANDS: [&str; 3] = ["reset", "restart", "start over"];

/// Command to advance a conversation by one turn
#[derive(Debug, Clone, Default)]
pub struct AdvanceTurnCommand {
    /// Session to continue. Missing, malformed and unknown ids start a new
    /// session.
    pub session_id: Option<String>,
    pub message: String,
    /// Always start a new session, discarding the given one.
    pub force_new_session: bool,
    /// With a restart command, clear the given session in place instead of
    /// replacing it. Ignored when `force_new_session` is set.
    pub reset_conversation: bool,
}

impl AdvanceTurnCommand {
    pub fn new(session_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceTurnResult {
    pub session_id: SessionId,
    /// Text to show the user: the next prompt, guidance, or the analysis.
    pub response: String,
    /// False once the terminal step is reached.
    pub is_collecting_info: bool,
    pub current_step: StepId,
    /// Set when the answer was rejected or the analysis failed.
    pub error: Option<String>,
    pub collected_data: CollectedData,
}

impl AdvanceTurnResult {
    fn prompt(state: &ConversationState) -> Self {
        Self {
            session_id: state.session_id,
            response: state.prompt().to_string(),
            is_collecting_info: state.is_collecting(),
            current_step: state.current_step,
            error: None,
            collected_data: state.collected_data.clone(),
        }
    }

    fn failed(state: &ConversationState, response: String, error: &IntakeError) -> Self {
        Self {
            response,
            error: Some(error.to_string()),
            ..Self::prompt(state)
        }
    }
}

/// Error type for advancing a turn
#[derive(Debug, Clone)]
pub enum AdvanceTurnError {
    /// Session disappeared while the turn was in progress
    SessionNotFound(SessionId),
}

impl std::fmt::Display for AdvanceTurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvanceTurnError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for AdvanceTurnError {}

impl From<SessionStoreError> for AdvanceTurnError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => AdvanceTurnError::SessionNotFound(id),
        }
    }
}

/// The conversation engine: decides what each turn answers, validates it,
/// advances the session and hands a finished case to the analyzer.
pub struct AdvanceTurnHandler {
    store: Arc<dyn SessionStore>,
    analyzer: Arc<dyn CaseAnalyzer>,
}

impl AdvanceTurnHandler {
    pub fn new(store: Arc<dyn SessionStore>, analyzer: Arc<dyn CaseAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    pub async fn handle(
        &self,
        cmd: AdvanceTurnCommand,
    ) -> Result<AdvanceTurnResult, AdvanceTurnError> {
        let text = cmd.message.trim();
        let requested = parse_session_id(cmd.session_id.as_deref());

        // 1. Restart commands
        if is_reset_command(text) || cmd.force_new_session {
            return self
                .restart(requested, cmd.force_new_session, cmd.reset_conversation)
                .await;
        }

        // 2. Resolve or create the session
        let handle = self.resolve(requested).await?;
        let mut state = handle.lock().await;

        // 3. Nothing to process: repeat the current prompt
        if text.is_empty() {
            return Ok(AdvanceTurnResult::prompt(&state));
        }

        // 4. Validate, store and advance
        let answered = state.current_step;
        match state.apply_answer(text) {
            Ok(next) => {
                tracing::debug!(
                    session_id = %state.session_id,
                    answered = %answered,
                    next = %next,
                    "Turn accepted"
                );
            }
            Err(rejected) => {
                tracing::warn!(
                    session_id = %state.session_id,
                    step = %answered,
                    reason = %rejected,
                    "Turn rejected"
                );
                let response = format!(
                    "I couldn't process your input: {}\n\nPlease try again. {}",
                    rejected,
                    state.prompt()
                );
                return Ok(AdvanceTurnResult::failed(
                    &state,
                    response,
                    &IntakeError::from(rejected),
                ));
            }
        }

        if state.is_collecting() {
            return Ok(AdvanceTurnResult::prompt(&state));
        }

        // 5. Terminal step: analyze outside the session lock
        let Some(generation) = state.begin_analysis() else {
            let err = IntakeError::AnalysisInFlight;
            return Ok(AdvanceTurnResult::failed(&state, err.to_string(), &err));
        };
        let session_id = state.session_id;
        let case = state.collected_data.clone();
        drop(state);

        tracing::info!(session_id = %session_id, fields = case.len(), "Case complete, requesting analysis");
        // Runs detached so the in-flight flag is cleared even if the caller goes away.
        let analysis = tokio::spawn({
            let analyzer = self.analyzer.clone();
            let handle = handle.clone();
            let case = case.clone();
            async move {
                let outcome = analyzer.analyze(&case).await;
                handle.lock().await.finish_analysis(generation);
                outcome.map_err(|err| err.to_string())
            }
        });
        let outcome = match analysis.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                handle.lock().await.finish_analysis(generation);
                Err(join_err.to_string())
            }
        };

        let (response, error) = match outcome {
            Ok(report) => (report, None),
            Err(err) => {
                tracing::warn!(session_id = %session_id, error = %err, "Case analysis failed");
                let err = IntakeError::Provider(err);
                (format!("Error analyzing case: {}", err), Some(err.to_string()))
            }
        };

        Ok(AdvanceTurnResult {
            session_id,
            response,
            is_collecting_info: false,
            current_step: StepId::Analysis,
            error,
            collected_data: case,
        })
    }

    async fn restart(
        &self,
        requested: Option<SessionId>,
        force_new_session: bool,
        reset_conversation: bool,
    ) -> Result<AdvanceTurnResult, AdvanceTurnError> {
        if reset_conversation && !force_new_session {
            if let Some(id) = requested {
                if self.store.reset_in_place(id).await.is_ok() {
                    let state = self.store.get(id).await?;
                    return Ok(AdvanceTurnResult::prompt(&state));
                }
            }
        }

        if let Some(old) = requested {
            self.store.delete(old).await?;
        }
        let id = self.store.create_session().await?;
        tracing::info!(session_id = %id, replaced = ?requested, "Conversation restarted");
        let state = self.store.get(id).await?;
        Ok(AdvanceTurnResult::prompt(&state))
    }

    async fn resolve(&self, requested: Option<SessionId>) -> Result<SessionHandle, AdvanceTurnError> {
        if let Some(id) = requested {
            match self.store.checkout(id).await {
                Ok(handle) => return Ok(handle),
                Err(SessionStoreError::NotFound(_)) => {
                    tracing::info!(session_id = %id, "Unknown session, starting a new one");
                }
            }
        }
        let id = self.store.create_session().await?;
        Ok(self.store.checkout(id).await?)
    }
}

fn parse_session_id(raw: Option<&str>) -> Option<SessionId> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn is_reset_command(text: &str) -> bool {
    RESET_COMMANDS
        .iter()
        .any(|command| text.eq_ignore_ascii_case(command))
}
