//! Model module for building nonlinear programs.
//!
//! This module provides the core [`Model`] type and the transformations the
//! infeasibility diagnosis runs on a cloned model.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Component access and iteration
//! - [`naming`]: Fully-qualified names, blocks, and lookup by name
//! - [`values`]: Variable values, fixing, and activation toggles
//! - [`bounds`]: Variable bounds rewritten as constraints
//! - [`slack`]: Elastic (slack) form of constraints

mod bounds;
mod builder;
mod error;
mod naming;
mod slack;
mod storage;
mod values;

use crate::slack::BoundOrigin;
use crate::types::{Constraint, Objective, Variable};
use elastica_expr::Expr;
use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};
use std::collections::{BTreeMap, BTreeSet};

pub use error::ModelError;
pub use naming::ComponentKey;

/// A nonlinear program: named variables, constraints, and objectives.
///
/// Components are only ever deactivated, never removed, so ids stay dense and
/// a structural clone keeps every id and name.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) variables: BTreeMap<VariableId, Variable>,
    pub(crate) constraints: BTreeMap<ConstraintId, Constraint>,
    pub(crate) objectives: BTreeMap<ObjectiveId, Objective>,
    pub(crate) next_variable_id: u32,
    pub(crate) next_constraint_id: u32,
    pub(crate) next_objective_id: u32,
    pub(crate) variable_names: BTreeMap<VariableId, String>,
    pub(crate) constraint_names: BTreeMap<ConstraintId, String>,
    pub(crate) objective_names: BTreeMap<ObjectiveId, String>,
    // Every fully-qualified name in use, across component kinds.
    pub(crate) name_index: BTreeMap<String, ComponentKey>,
    pub(crate) blocks: BTreeSet<String>,
    pub(crate) bound_origins: BTreeMap<ConstraintId, BoundOrigin>,
    pub(crate) slack_owners: BTreeMap<VariableId, ConstraintId>,
}

impl Model {
    /// Create a new empty model named `model`.
    pub fn new() -> Self {
        Self::named("model")
    }

    /// Create a new empty model with a name used in reports.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: BTreeMap::new(),
            constraints: BTreeMap::new(),
            objectives: BTreeMap::new(),
            next_variable_id: 0,
            next_constraint_id: 0,
            next_objective_id: 0,
            variable_names: BTreeMap::new(),
            constraint_names: BTreeMap::new(),
            objective_names: BTreeMap::new(),
            name_index: BTreeMap::new(),
            blocks: BTreeSet::new(),
            bound_origins: BTreeMap::new(),
            slack_owners: BTreeMap::new(),
        }
    }

    /// Name of the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if self.constraints.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    pub(crate) fn ensure_expr_variables(&self, expr: &Expr) -> Result<(), ModelError> {
        match expr
            .variables()
            .into_iter()
            .find(|id| !self.variables.contains_key(id))
        {
            Some(id) => Err(ModelError::UnknownExprVariable(id)),
            None => Ok(()),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
