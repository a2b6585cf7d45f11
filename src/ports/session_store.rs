//! Session Store Port - Registry of live intake sessions.
//!
//! The store owns its synchronization. Callers that need a read-modify-write
//! of one session check out its [`SessionHandle`] and hold the lock for the
//! duration of the change.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::intake::ConversationState;

/// Exclusive access to one session's state.
pub type SessionHandle = Arc<Mutex<ConversationState>>;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Port for creating, reading and discarding intake sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session at the initial step with no answers.
    async fn create_session(&self) -> Result<SessionId, SessionStoreError>;

    /// Returns a snapshot of the session's state.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the id is unknown
    async fn get(&self, id: SessionId) -> Result<ConversationState, SessionStoreError>;

    /// Returns the lock handle for the session.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the id is unknown
    async fn checkout(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Removes the session. Returns false if it did not exist.
    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError>;

    /// Returns the session to the initial step and clears its answers,
    /// keeping the id.
    async fn reset_in_place(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// Removes sessions not updated within `max_idle`. Returns how many
    /// were removed.
    async fn evict_idle(&self, max_idle: Duration) -> Result<usize, SessionStoreError>;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}
