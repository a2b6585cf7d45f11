//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `OpenAICompatibleProvider` - Any OpenAI-style `/chat/completions` API
//!   (NVIDIA-hosted Llama Nemotron by default)
//! - `MockAIProvider` - Scripted provider for tests and offline runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_ANALYSIS};
pub use openai_provider::{
    OpenAICompatibleConfig, OpenAICompatibleProvider, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
