//! Solver error types.

use elastica_core::ModelError;

/// Error type for solver operations.
///
/// [`SolverError::EvaluationFailure`] is the one recoverable variant: the
/// solver raised while evaluating the model. Every other variant is fatal for
/// a diagnosis run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A model function could not be evaluated during the solve.
    EvaluationFailure {
        /// Constraint being evaluated, when known.
        constraint: Option<String>,
        message: String,
    },
    /// The backend cannot represent part of the model.
    Unsupported(String),
    /// No solver registered under the requested name.
    SolverNotAvailable(String),
    /// The model violates a structural rule.
    Model(ModelError),
    /// Internal solver error.
    InternalError(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EvaluationFailure { .. } => "SOLVER_EVALUATION_FAILURE",
            SolverError::Unsupported(_) => "SOLVER_UNSUPPORTED",
            SolverError::SolverNotAvailable(_) => "SOLVER_NOT_AVAILABLE",
            SolverError::Model(_) => "SOLVER_MODEL",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
        }
    }

    pub fn is_evaluation_failure(&self) -> bool {
        matches!(self, SolverError::EvaluationFailure { .. })
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EvaluationFailure {
                constraint: Some(name),
                message,
            } => write!(
                f,
                "[{}] Evaluation failed in constraint {}: {}",
                self.code(),
                name,
                message
            ),
            SolverError::EvaluationFailure {
                constraint: None,
                message,
            } => write!(f, "[{}] Evaluation failed: {}", self.code(), message),
            SolverError::Unsupported(msg) => {
                write!(f, "[{}] Unsupported model: {}", self.code(), msg)
            }
            SolverError::SolverNotAvailable(name) => {
                write!(f, "[{}] Solver not available: {}", self.code(), name)
            }
            SolverError::Model(err) => write!(f, "[{}] {}", self.code(), err),
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for SolverError {
    fn from(err: ModelError) -> Self {
        SolverError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_evaluation_failure() {
        let err = SolverError::EvaluationFailure {
            constraint: Some("unit.balance".to_string()),
            message: "log of negative".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SOLVER_EVALUATION_FAILURE"));
        assert!(msg.contains("unit.balance"));
        assert!(err.is_evaluation_failure());
    }

    #[test]
    fn test_error_display_not_available() {
        let err = SolverError::SolverNotAvailable("ipopt".to_string());
        assert!(err.to_string().contains("ipopt"));
        assert!(!err.is_evaluation_failure());
    }

    #[test]
    fn test_model_error_converts() {
        let err: SolverError = ModelError::MultipleObjectives.into();
        assert_eq!(err.code(), "SOLVER_MODEL");
        assert!(err.to_string().contains("OBJECTIVE_MULTIPLE_ACTIVE"));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            SolverError::Unsupported(String::new()).code(),
            "SOLVER_UNSUPPORTED"
        );
        assert_eq!(
            SolverError::InternalError(String::new()).code(),
            "SOLVER_INTERNAL"
        );
    }
}
