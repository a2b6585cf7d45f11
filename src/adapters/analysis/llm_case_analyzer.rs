//! AI-powered CaseAnalyzer implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::intake::{validate, CaseField, CollectedData, ValidationKind};
use crate::ports::{
    AIProvider, AnalysisError, CaseAnalyzer, CompletionRequest, MessageRole, RequestMetadata,
};

const SYSTEM_PROMPT: &str = "You are a homicide investigation analyst, an AI assistant specialized in analyzing and solving murder cases. Provide detailed analysis, insights, and investigative approaches based solely on the case details provided. Focus on the specific information given and avoid making assumptions beyond what's in the data.";

const PROMPT_HEADER: &str =
    "Analyze the following murder case and provide insights and solutions based ONLY on the data provided:";

const PROMPT_REQUESTS: [&str; 5] = [
    "A comprehensive analysis of the case",
    "Potential motives and suspects to consider based on the evidence",
    "Recommended investigative approaches specific to this case",
    "Key evidence to focus on and how to analyze it",
    "Possible solutions or conclusions that follow directly from the data",
];

const PROMPT_CLOSING: &str = "Important: Base your analysis ONLY on the information provided in this case. Do not use generic templates or assumptions not supported by the data.";

pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Case analyzer that asks an LLM for an investigative report
pub struct LlmCaseAnalyzer {
    ai_provider: Arc<dyn AIProvider>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmCaseAnalyzer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Cleans a case before it is sent for analysis.
///
/// Values are trimmed and blanks dropped, every field an analysis needs is
/// present (as `Unknown` when unanswered), and date, time and age values are
/// normalized again when they parse.
pub fn standardize_case(case: &CollectedData) -> CollectedData {
    let mut cleaned: CollectedData = case
        .iter()
        .map(|(field, value)| (field, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| {
            let value = match renormalization_kind(field) {
                Some(kind) => validate(value, kind).unwrap_or_else(|_| value.to_string()),
                None => value.to_string(),
            };
            (field, value)
        })
        .collect();

    for field in CaseField::required_for_analysis() {
        if !cleaned.contains(*field) {
            cleaned.insert(*field, "Unknown");
        }
    }
    cleaned
}

fn renormalization_kind(field: CaseField) -> Option<ValidationKind> {
    match field {
        CaseField::DateOfCrime => Some(ValidationKind::Date),
        CaseField::TimeOfCrime => Some(ValidationKind::Time),
        CaseField::VictimAge => Some(ValidationKind::Age),
        _ => None,
    }
}

/// Renders the analysis prompt for an already standardized case.
pub fn format_case_prompt(case: &CollectedData) -> String {
    let mut prompt = format!("{}\n\n", PROMPT_HEADER);
    for (field, value) in case.iter() {
        prompt.push_str(&format!("{}: {}\n", field.label(), value));
    }

    prompt.push_str("\n\nBased on these specific details, please provide:\n");
    for (index, request) in PROMPT_REQUESTS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, request));
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_CLOSING);
    prompt
}

#[async_trait]
impl CaseAnalyzer for LlmCaseAnalyzer {
    async fn analyze(&self, case: &CollectedData) -> Result<String, AnalysisError> {
        let standardized = standardize_case(case);
        let prompt = format_case_prompt(&standardized);
        let trace_id = format!("case-analysis-{}", uuid::Uuid::new_v4());

        tracing::info!(
            trace_id = %trace_id,
            model = %self.ai_provider.provider_info().model,
            fields = standardized.len(),
            prompt_tokens = self.ai_provider.estimate_tokens(&prompt),
            "Requesting case analysis"
        );

        let request = CompletionRequest::new(RequestMetadata::new(trace_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.ai_provider.complete(request).await?;

        if response.content.trim().is_empty() {
            tracing::warn!(model = %response.model, "Analysis came back empty");
            return Err(AnalysisError::EmptyResponse);
        }

        tracing::debug!(
            completion_tokens = response.usage.completion_tokens,
            finish_reason = ?response.finish_reason,
            "Case analysis received"
        );
        Ok(response.content)
    }
}
