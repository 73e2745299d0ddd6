//! Model error types.

use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid variable ID
    InvalidVariableId(VariableId),
    /// Invalid constraint ID
    InvalidConstraintId(ConstraintId),
    /// Invalid objective ID
    InvalidObjectiveId(ObjectiveId),
    /// NaN in variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// NaN in constraint bounds
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Component names must be non-empty
    EmptyName,
    /// A component with this name already exists
    DuplicateName(String),
    /// An expression references a variable the model does not own
    UnknownExprVariable(VariableId),
    /// More than one objective is active
    MultipleObjectives,
    /// Variable is not a slack created by elasticization
    UnknownSlack(VariableId),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidObjectiveId(_) => "OBJECTIVE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::EmptyName => "NAME_EMPTY",
            ModelError::DuplicateName(_) => "NAME_DUPLICATE",
            ModelError::UnknownExprVariable(_) => "EXPR_UNKNOWN_VARIABLE",
            ModelError::MultipleObjectives => "OBJECTIVE_MULTIPLE_ACTIVE",
            ModelError::UnknownSlack(_) => "SLACK_UNKNOWN",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidObjectiveId(id) => write!(
                f,
                "[{}] Objective ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds must not be NaN (lower {}, upper {})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds must not be NaN (lower {}, upper {})",
                self.code(),
                lower,
                upper
            ),
            ModelError::EmptyName => write!(f, "[{}] Component name is empty", self.code()),
            ModelError::DuplicateName(name) => write!(
                f,
                "[{}] Component '{}' already exists",
                self.code(),
                name
            ),
            ModelError::UnknownExprVariable(id) => write!(
                f,
                "[{}] Expression references unknown variable {}",
                self.code(),
                id
            ),
            ModelError::MultipleObjectives => write!(
                f,
                "[{}] More than one objective is active",
                self.code()
            ),
            ModelError::UnknownSlack(id) => write!(
                f,
                "[{}] Variable {} is not an elastic slack",
                self.code(),
                id
            ),
        }
    }
}

impl std::error::Error for ModelError {}
