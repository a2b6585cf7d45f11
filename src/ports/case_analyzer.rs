//! CaseAnalyzer port for turning a completed intake into a report

use async_trait::async_trait;

use crate::domain::intake::CollectedData;

use super::ai_provider::AIError;

/// Errors produced while analyzing a case
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] AIError),

    #[error("analysis returned no content")]
    EmptyResponse,
}

/// Produces a natural-language analysis of a collected case
#[async_trait]
pub trait CaseAnalyzer: Send + Sync {
    /// Analyze the collected fields and return the report text.
    ///
    /// Called once per completed intake; failures are reported to the user
    /// and not retried by the caller.
    async fn analyze(&self, case: &CollectedData) -> Result<String, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_is_transparent() {
        let err = AnalysisError::from(AIError::unavailable("upstream 503"));
        assert_eq!(err.to_string(), "provider unavailable: upstream 503");
    }

    #[test]
    fn test_empty_response_message() {
        assert_eq!(
            AnalysisError::EmptyResponse.to_string(),
            "analysis returned no content"
        );
    }
}
