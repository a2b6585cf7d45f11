//! Case analysis adapters.

mod llm_case_analyzer;

pub use llm_case_analyzer::{
    format_case_prompt, standardize_case, LlmCaseAnalyzer, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
