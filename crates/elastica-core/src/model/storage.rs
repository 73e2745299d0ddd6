//! Component access and iteration.

use crate::slack::BoundOrigin;
use crate::types::{Constraint, Objective, Variable};
use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    pub fn get_objective(&self, id: ObjectiveId) -> Result<&Objective, ModelError> {
        self.objectives
            .get(&id)
            .ok_or(ModelError::InvalidObjectiveId(id))
    }

    /// Variables in id order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> + '_ {
        self.variables.iter().map(|(id, var)| (*id, var))
    }

    /// Constraints in id order, active or not.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.constraints.iter().map(|(id, con)| (*id, con))
    }

    /// Active constraints in id order.
    pub fn active_constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.constraints().filter(|(_, con)| con.active)
    }

    pub fn objectives(&self) -> impl Iterator<Item = (ObjectiveId, &Objective)> + '_ {
        self.objectives.iter().map(|(id, obj)| (*id, obj))
    }

    /// The single active objective, if any.
    pub fn active_objective(&self) -> Result<Option<(ObjectiveId, &Objective)>, ModelError> {
        let mut active = self.objectives().filter(|(_, obj)| obj.active);
        let first = active.next();
        if active.next().is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        Ok(first)
    }

    /// Variable bound a synthesized constraint stands for.
    pub fn bound_origin(&self, id: ConstraintId) -> Option<BoundOrigin> {
        self.bound_origins.get(&id).copied()
    }
}
