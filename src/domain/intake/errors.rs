//! Error types for the intake domain

use super::validation::RejectedInput;

/// Failures the intake conversation can run into.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum IntakeError {
    /// The answer did not pass validation; the same step is asked again.
    #[error("{0}")]
    ValidationRejected(#[from] RejectedInput),

    /// The analysis collaborator failed. The text is shown verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("An analysis for this case is already in progress. Please wait for it to finish.")]
    AnalysisInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejected_displays_guidance() {
        let err = IntakeError::from(RejectedInput::MinuteOutOfRange);

        assert_eq!(err.to_string(), "Please provide a valid minute between 0-59.");
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = IntakeError::Provider("Service unavailable: upstream 503".to_string());

        assert_eq!(err.to_string(), "Service unavailable: upstream 503");
    }
}
