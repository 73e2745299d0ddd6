//! Expression evaluation errors.

use crate::ids::VariableId;

/// Raised when an expression cannot be evaluated at a point.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A referenced variable has no value.
    MissingValue(VariableId),
    /// The expression evaluated to NaN or an infinity.
    NonFinite { value: f64 },
}

impl EvaluationError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EvaluationError::MissingValue(_) => "EXPR_MISSING_VALUE",
            EvaluationError::NonFinite { .. } => "EXPR_NON_FINITE",
        }
    }
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationError::MissingValue(id) => {
                write!(f, "[{}] Variable {} has no value", self.code(), id)
            }
            EvaluationError::NonFinite { value } => {
                write!(f, "[{}] Expression evaluated to {}", self.code(), value)
            }
        }
    }
}

impl std::error::Error for EvaluationError {}
