//! Rewrite variable bounds as explicit constraints.

use crate::slack::{BoundConstraints, BoundOrigin, BoundSide};
use crate::types::{Bounds, Domain};
use elastica_expr::Expr;
use elastica_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;
use crate::model::naming::qualified_name;

impl Model {
    /// Move every finite bound of a free variable into a constraint.
    ///
    /// Converted variables end up in [`Domain::Reals`] with free bounds.
    /// Fixed variables are skipped, and a model without bounded free
    /// variables is left untouched.
    pub fn bounds_as_constraints(&mut self) -> Result<BoundConstraints, ModelError> {
        let pending: Vec<(VariableId, Bounds)> = self
            .variables()
            .filter(|(_, var)| !var.fixed)
            .map(|(id, var)| (id, var.effective_bounds()))
            .filter(|(_, bounds)| !bounds.is_free())
            .collect();

        if pending.is_empty() {
            tracing::debug!(
                component = "transform",
                operation = "bounds_as_constraints",
                status = "skipped",
                "No bounded free variables"
            );
            return Ok(BoundConstraints::default());
        }

        let block = self.unique_component_name("_variable_bounds");
        let block = self.add_block(block)?;
        let mut constraints = Vec::new();

        for (id, bounds) in pending {
            if bounds.has_lower() {
                constraints.push(self.add_bound_constraint(&block, id, BoundSide::Lower, bounds)?);
            }
            if bounds.has_upper() {
                constraints.push(self.add_bound_constraint(&block, id, BoundSide::Upper, bounds)?);
            }
            let var = self.variable_mut(id)?;
            var.domain = Domain::Reals;
            var.bounds = Bounds::free();
        }

        tracing::debug!(
            component = "transform",
            operation = "bounds_as_constraints",
            status = "success",
            block = %block,
            constraints = constraints.len(),
            "Converted variable bounds"
        );
        Ok(BoundConstraints {
            block: Some(block),
            constraints,
        })
    }

    fn add_bound_constraint(
        &mut self,
        block: &str,
        variable: VariableId,
        side: BoundSide,
        bounds: Bounds,
    ) -> Result<ConstraintId, ModelError> {
        let var_name = self
            .get_variable_name(variable)
            .ok_or(ModelError::InvalidVariableId(variable))?;
        let local = format!("{}{}", side.name_prefix(), var_name);
        let con_bounds = match side {
            BoundSide::Lower => Bounds::at_least(bounds.lower),
            BoundSide::Upper => Bounds::at_most(bounds.upper),
        };
        let id =
            self.add_bounded_constraint(qualified_name(block, &local), Expr::var(variable), con_bounds)?;
        self.bound_origins
            .insert(id, BoundOrigin { variable, side });
        Ok(id)
    }
}
