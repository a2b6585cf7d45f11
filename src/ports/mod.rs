//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Registry of live intake sessions
//! - `CaseAnalyzer` - Produces the analysis report for a completed intake
//! - `AIProvider` - Provider-agnostic chat completion

mod ai_provider;
mod case_analyzer;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use case_analyzer::{AnalysisError, CaseAnalyzer};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
