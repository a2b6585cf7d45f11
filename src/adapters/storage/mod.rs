//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - Keeps sessions in process memory
//! - **IdleSessionSweeper** - Optional background eviction of idle sessions

mod idle_session_sweeper;
mod in_memory_session_store;

pub use idle_session_sweeper::{IdleSessionSweeper, IdleSessionSweeperConfig};
pub use in_memory_session_store::InMemorySessionStore;
