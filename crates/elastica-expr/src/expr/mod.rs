//! Expression types for optimization modeling.
//!
//! - `core`: `Expr`, terms by degree plus a constant, and evaluation
//! - `constraint`: `ConstraintExpr`, an expression between a lower and upper bound
//! - `builders`: helpers for assembling expressions
//! - `error`: evaluation errors

pub mod builders;
pub mod constraint;
pub mod core;
pub mod error;

pub use builders::linear_sum;
pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::Expr;
pub use error::EvaluationError;
