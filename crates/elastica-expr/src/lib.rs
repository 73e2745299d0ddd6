pub mod expr;
pub mod ids;

pub use expr::{ComparisonSense, ConstraintExpr, EvaluationError, Expr, linear_sum};
pub use ids::{ConstraintId, ObjectiveId, VariableId};
