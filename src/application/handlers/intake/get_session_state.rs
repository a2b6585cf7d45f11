//! GetSessionStateHandler - Query where an intake session stands

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::ConversationState;
use crate::ports::{SessionStore, SessionStoreError};

/// Query to get a session's state
#[derive(Debug, Clone)]
pub struct GetSessionStateQuery {
    pub session_id: SessionId,
}

/// Snapshot of a session
#[derive(Debug, Clone)]
pub struct GetSessionStateResult {
    pub state: ConversationState,
    /// Prompt for the step awaiting an answer.
    pub prompt: &'static str,
}

/// Error type for getting session state
#[derive(Debug, Clone)]
pub enum GetSessionStateError {
    /// Session not found
    NotFound(SessionId),
}

impl std::fmt::Display for GetSessionStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetSessionStateError::NotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for GetSessionStateError {}

impl From<SessionStoreError> for GetSessionStateError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => GetSessionStateError::NotFound(id),
        }
    }
}

/// Handler for getting session state
pub struct GetSessionStateHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionStateHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetSessionStateQuery,
    ) -> Result<GetSessionStateResult, GetSessionStateError> {
        let state = self.store.get(query.session_id).await?;
        let prompt = state.prompt();

        Ok(GetSessionStateResult { state, prompt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{CaseField, StepId};

    #[tokio::test]
    async fn test_get_session_state_returns_snapshot() {
        let store = Arc::new(InMemorySessionStore::new());
        let session_id = store.create_session().await.unwrap();
        store
            .checkout(session_id)
            .await
            .unwrap()
            .lock()
            .await
            .apply_answer("CASE-3")
            .unwrap();

        let handler = GetSessionStateHandler::new(store);
        let result = handler
            .handle(GetSessionStateQuery { session_id })
            .await
            .unwrap();

        assert_eq!(result.state.current_step, StepId::DateOfCrime);
        assert_eq!(result.prompt, StepId::DateOfCrime.definition().prompt);
        assert_eq!(
            result.state.collected_data.get(CaseField::CaseId),
            Some("CASE-3")
        );
    }

    #[tokio::test]
    async fn test_get_session_state_fails_if_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = GetSessionStateHandler::new(store);

        let result = handler
            .handle(GetSessionStateQuery {
                session_id: SessionId::new(),
            })
            .await;

        assert!(matches!(result, Err(GetSessionStateError::NotFound(_))));
    }
}
