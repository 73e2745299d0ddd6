//! Elastica core model: variables, constraints, objectives and the elastic
//! transforms used by the infeasibility diagnosis.

pub mod model;
pub mod slack;
pub mod types;

pub use model::{ComponentKey, Model, ModelError};
pub use slack::{BoundConstraints, BoundOrigin, BoundSide, ElasticBlock, SlackHandle};
pub use types::{Bounds, Constraint, Domain, Objective, Sense, Variable};

pub use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};
pub use elastica_expr::{ConstraintExpr, Expr};
