//! ResetSessionHandler - Discard a session and start a fresh one

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::StepId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to reset a session
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

/// Result of resetting a session
#[derive(Debug, Clone, PartialEq)]
pub struct ResetSessionResult {
    pub previous_session_id: SessionId,
    pub session_id: SessionId,
    pub current_step: StepId,
    pub prompt: &'static str,
}

/// Error type for resetting a session
#[derive(Debug, Clone)]
pub enum ResetSessionError {
    /// Session not found
    NotFound(SessionId),
}

impl std::fmt::Display for ResetSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetSessionError::NotFound(id) => write!(f, "Session not found: {}", id),
        }
    }
}

impl std::error::Error for ResetSessionError {}

impl From<SessionStoreError> for ResetSessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => ResetSessionError::NotFound(id),
        }
    }
}

/// Handler for resetting sessions
pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<ResetSessionResult, ResetSessionError> {
        if !self.store.delete(cmd.session_id).await? {
            return Err(ResetSessionError::NotFound(cmd.session_id));
        }

        let session_id = self.store.create_session().await?;
        tracing::info!(
            previous_session_id = %cmd.session_id,
            session_id = %session_id,
            "Session reset"
        );

        Ok(ResetSessionResult {
            previous_session_id: cmd.session_id,
            session_id,
            current_step: StepId::INITIAL,
            prompt: StepId::INITIAL.definition().prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn test_reset_session_replaces_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let old = store.create_session().await.unwrap();
        let handler = ResetSessionHandler::new(store.clone());

        let result = handler
            .handle(ResetSessionCommand { session_id: old })
            .await
            .unwrap();

        assert_eq!(result.previous_session_id, old);
        assert_ne!(result.session_id, old);
        assert_eq!(result.current_step, StepId::Greeting);
        assert!(store.get(old).await.is_err());
        assert!(store.get(result.session_id).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_reset_session_fails_if_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = ResetSessionHandler::new(store.clone());

        let result = handler
            .handle(ResetSessionCommand {
                session_id: SessionId::new(),
            })
            .await;

        assert!(matches!(result, Err(ResetSessionError::NotFound(_))));
        assert_eq!(store.len().await, 0);
    }
}
