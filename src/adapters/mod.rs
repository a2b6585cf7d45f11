//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language model providers (OpenAI-compatible HTTP, mock)
//! - `analysis` - Case analysis on top of an AI provider
//! - `http` - REST API (axum)
//! - `storage` - Session storage (in-memory) and idle eviction

pub mod ai;
pub mod analysis;
pub mod http;
pub mod storage;

pub use ai::{MockAIProvider, OpenAICompatibleConfig, OpenAICompatibleProvider};
pub use analysis::LlmCaseAnalyzer;
pub use http::{router, IntakeAppState};
pub use storage::{IdleSessionSweeper, IdleSessionSweeperConfig, InMemorySessionStore};
