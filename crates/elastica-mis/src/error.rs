//! Diagnosis error types.

use elastica_core::ModelError;
use elastica_solver::SolverError;

/// Errors that abort a diagnosis run.
///
/// Infeasible or non-optimal solves are never errors; they drive the
/// algorithm. Evaluation failures are only errors outside the deletion
/// filter.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisError {
    /// A model operation failed.
    Model(ModelError),
    /// A solve failed fatally.
    Solver(SolverError),
    /// The transformed model is inconsistent with the original.
    Structural(String),
}

impl DiagnosisError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosisError::Model(_) => "DIAGNOSIS_MODEL",
            DiagnosisError::Solver(_) => "DIAGNOSIS_SOLVER",
            DiagnosisError::Structural(_) => "DIAGNOSIS_STRUCTURAL",
        }
    }
}

impl std::fmt::Display for DiagnosisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosisError::Model(err) => write!(f, "[{}] {}", self.code(), err),
            DiagnosisError::Solver(err) => write!(f, "[{}] {}", self.code(), err),
            DiagnosisError::Structural(msg) => {
                write!(f, "[{}] Structural error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for DiagnosisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiagnosisError::Model(err) => Some(err),
            DiagnosisError::Solver(err) => Some(err),
            DiagnosisError::Structural(_) => None,
        }
    }
}

impl From<ModelError> for DiagnosisError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownSlack(id) => {
                DiagnosisError::Structural(format!("variable {} is not a known slack", id))
            }
            other => DiagnosisError::Model(other),
        }
    }
}

impl From<SolverError> for DiagnosisError {
    fn from(err: SolverError) -> Self {
        DiagnosisError::Solver(err)
    }
}
