//! In-Memory Session Store Adapter
//!
//! Keeps every intake session in process memory. Sessions live until they are
//! deleted, reset, or evicted for idleness.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::ConversationState;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// In-memory registry of intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn handle(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self) -> Result<SessionId, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let mut id = SessionId::new();
        while sessions.contains_key(&id) {
            id = SessionId::new();
        }
        sessions.insert(id, Arc::new(Mutex::new(ConversationState::new(id))));
        tracing::info!(session_id = %id, live_sessions = sessions.len(), "Session created");
        Ok(id)
    }

    async fn get(&self, id: SessionId) -> Result<ConversationState, SessionStoreError> {
        let handle = self.handle(id).await?;
        let state = handle.lock().await;
        Ok(state.clone())
    }

    async fn checkout(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.handle(id).await
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session deleted");
        }
        Ok(removed)
    }

    async fn reset_in_place(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let handle = self.handle(id).await?;
        handle.lock().await.reset();
        tracing::info!(session_id = %id, "Session reset in place");
        Ok(())
    }

    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, SessionStoreError> {
        let cutoff = Timestamp::now().minus_secs(max_idle.as_secs());
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // A session whose lock is held is mid-turn, so it is not idle.
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => state.analysis_in_flight || !state.last_updated.is_before(&cutoff),
            Err(_) => true,
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        Ok(evicted)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
