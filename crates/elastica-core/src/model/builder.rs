//! Model builder methods for adding variables, constraints, and objectives.

use crate::types::{Bounds, Constraint, Domain, Objective, Sense, Variable};
use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};
use elastica_expr::{ConstraintExpr, Expr};

use crate::model::Model;
use crate::model::naming::ComponentKey;
use crate::model::error::ModelError;

impl Model {
    /// Add a variable under a unique fully-qualified name.
    ///
    /// Inverted bounds (`lower > upper`) are accepted as given; only NaN is
    /// rejected.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        if variable.bounds.is_nan() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }
        let name = self.claim_name(name.into())?;

        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        self.variables.insert(id, variable);
        self.index_name(&name, ComponentKey::Variable(id));
        self.variable_names.insert(id, name);

        Ok(id)
    }

    /// Add a constraint from a comparison expression (e.g., `x + y <= 10`).
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (body, lower, upper) = constraint.into_parts();
        self.add_bounded_constraint(name, body, Bounds::new(lower, upper))
    }

    /// Add a constraint `bounds.lower <= body <= bounds.upper`.
    pub fn add_bounded_constraint(
        &mut self,
        name: impl Into<String>,
        body: Expr,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        if bounds.is_nan() {
            return Err(ModelError::InvalidConstraintBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        self.ensure_expr_variables(&body)?;
        let name = self.claim_name(name.into())?;

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(id, Constraint::new(body, bounds));
        self.index_name(&name, ComponentKey::Constraint(id));
        self.constraint_names.insert(id, name);

        Ok(id)
    }

    /// Add an active objective.
    pub fn add_objective(
        &mut self,
        name: impl Into<String>,
        sense: Sense,
        expr: Expr,
    ) -> Result<ObjectiveId, ModelError> {
        self.ensure_expr_variables(&expr)?;
        let name = self.claim_name(name.into())?;

        let id = ObjectiveId::new(self.next_objective_id);
        self.next_objective_id += 1;
        self.objectives.insert(id, Objective::new(sense, expr));
        self.index_name(&name, ComponentKey::Objective(id));
        self.objective_names.insert(id, name.clone());

        tracing::debug!(
            component = "model",
            operation = "add_objective",
            status = "success",
            sense = sense.as_str(),
            objective = %name,
            "Added objective"
        );
        Ok(id)
    }

    /// Minimize an expression under the default name `objective`.
    pub fn minimize(&mut self, expr: Expr) -> Result<ObjectiveId, ModelError> {
        self.add_objective("objective", Sense::Minimize, expr)
    }

    /// Maximize an expression under the default name `objective`.
    pub fn maximize(&mut self, expr: Expr) -> Result<ObjectiveId, ModelError> {
        self.add_objective("objective", Sense::Maximize, expr)
    }

    /// Replace a variable's explicit bounds.
    pub fn set_bounds(&mut self, id: VariableId, bounds: Bounds) -> Result<(), ModelError> {
        if bounds.is_nan() {
            return Err(ModelError::InvalidVariableBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        self.variable_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// Replace a variable's domain restriction.
    pub fn set_domain(&mut self, id: VariableId, domain: Domain) -> Result<(), ModelError> {
        self.variable_mut(id)?.domain = domain;
        Ok(())
    }

    /// Deactivate a constraint without removing it.
    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.constraint_mut(id)?.active = false;
        Ok(())
    }

    /// Activate a previously deactivated constraint.
    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.constraint_mut(id)?.active = true;
        Ok(())
    }

    /// Deactivate an objective without removing it.
    pub fn deactivate_objective(&mut self, id: ObjectiveId) -> Result<(), ModelError> {
        self.objectives
            .get_mut(&id)
            .ok_or(ModelError::InvalidObjectiveId(id))?
            .active = false;
        Ok(())
    }

    /// Deactivate every objective.
    pub fn deactivate_objectives(&mut self) {
        for objective in self.objectives.values_mut() {
            objective.active = false;
        }
    }

    pub(crate) fn variable_mut(&mut self, id: VariableId) -> Result<&mut Variable, ModelError> {
        self.variables
            .get_mut(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub(crate) fn constraint_mut(
        &mut self,
        id: ConstraintId,
    ) -> Result<&mut Constraint, ModelError> {
        self.constraints
            .get_mut(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }
}
