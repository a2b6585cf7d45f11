//! AnalyzeSampleCaseHandler - Run the analyzer on a built-in demonstration case

use std::sync::Arc;

use crate::domain::intake::{CaseField, CollectedData};
use crate::ports::{AnalysisError, CaseAnalyzer};

/// The demonstration case, in canonical field order.
pub fn sample_case() -> CollectedData {
    [
        (CaseField::CaseId, "SAMPLE-001"),
        (CaseField::DateOfCrime, "2023-10-15"),
        (CaseField::TimeOfCrime, "23:30"),
        (CaseField::Location, "789 Elm Street, Apartment 3C"),
        (CaseField::VictimName, "Robert Johnson"),
        (CaseField::VictimAge, "42"),
        (CaseField::VictimGender, "Male"),
        (CaseField::CauseOfDeath, "Multiple stab wounds to the chest"),
        (CaseField::WeaponUsed, "Kitchen knife"),
        (
            CaseField::CrimeSceneDescription,
            "Victim found in living room. Signs of struggle. Furniture overturned. No signs of forced entry.",
        ),
        (CaseField::Witnesses, "Neighbor heard argument around 23:00"),
        (
            CaseField::EvidenceFound,
            "Bloody knife, fingerprints on door handle, victim's phone with text messages",
        ),
        (
            CaseField::Suspects,
            "Ex-wife with history of threats, business partner with financial dispute",
        ),
        (
            CaseField::AdditionalNotes,
            "Victim recently changed his will, removing ex-wife as beneficiary",
        ),
    ]
    .into_iter()
    .map(|(field, value)| (field, value.to_string()))
    .collect()
}

/// Result of analyzing the sample case
#[derive(Debug, Clone)]
pub struct AnalyzeSampleCaseResult {
    pub case: CollectedData,
    pub analysis: String,
}

/// Error type for analyzing the sample case
#[derive(Debug, Clone)]
pub enum AnalyzeSampleCaseError {
    /// Analyzer failed
    Analysis(String),
}

impl std::fmt::Display for AnalyzeSampleCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeSampleCaseError::Analysis(err) => {
                write!(f, "Error analyzing sample case: {}", err)
            }
        }
    }
}

impl std::error::Error for AnalyzeSampleCaseError {}

impl From<AnalysisError> for AnalyzeSampleCaseError {
    fn from(err: AnalysisError) -> Self {
        AnalyzeSampleCaseError::Analysis(err.to_string())
    }
}

/// Handler for analyzing the sample case
pub struct AnalyzeSampleCaseHandler {
    analyzer: Arc<dyn CaseAnalyzer>,
}

impl AnalyzeSampleCaseHandler {
    pub fn new(analyzer: Arc<dyn CaseAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn handle(&self) -> Result<AnalyzeSampleCaseResult, AnalyzeSampleCaseError> {
        let case = sample_case();
        let analysis = self.analyzer.analyze(&case).await?;

        Ok(AnalyzeSampleCaseResult { case, analysis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::analysis::LlmCaseAnalyzer;

    #[test]
    fn test_sample_case_fills_every_field() {
        let case = sample_case();
        assert_eq!(case.len(), CaseField::all().len());
        assert_eq!(case.get(CaseField::CaseId), Some("SAMPLE-001"));
    }

    #[tokio::test]
    async fn test_analyze_sample_case_returns_case_and_analysis() {
        let provider = Arc::new(MockAIProvider::new().with_response("Sample report"));
        let handler = AnalyzeSampleCaseHandler::new(Arc::new(LlmCaseAnalyzer::new(provider.clone())));

        let result = handler.handle().await.unwrap();

        assert_eq!(result.analysis, "Sample report");
        assert_eq!(result.case, sample_case());
        assert!(provider
            .last_prompt()
            .unwrap()
            .contains("Victim Name: Robert Johnson"));
    }

    #[tokio::test]
    async fn test_analyze_sample_case_reports_failure() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 120 }));
        let handler = AnalyzeSampleCaseHandler::new(Arc::new(LlmCaseAnalyzer::new(provider)));

        let err = handler.handle().await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error analyzing sample case: request timed out after 120s"
        );
    }
}
