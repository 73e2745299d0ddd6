//! Elastic form of a model: every active constraint gets a slack pair.

use crate::slack::{ElasticBlock, SlackHandle};
use crate::types::{Domain, Sense, Variable};
use elastica_expr::ids::{ConstraintId, VariableId};
use elastica_expr::{Expr, linear_sum};

use crate::model::Model;
use crate::model::error::ModelError;
use crate::model::naming::qualified_name;

impl Model {
    /// Add slack variables to every active constraint and minimize their sum.
    ///
    /// The body `b` of each constraint becomes `b + plus - minus`; `plus` is
    /// only created for a finite lower bound and `minus` only for a finite
    /// upper bound. Existing objectives are deactivated.
    pub fn elasticize(&mut self) -> Result<ElasticBlock, ModelError> {
        let targets: Vec<ConstraintId> = self.active_constraints().map(|(id, _)| id).collect();

        let block = self.unique_component_name("_core_add_slack_variables");
        let block = self.add_block(block)?;

        let mut handles = Vec::with_capacity(targets.len());
        for constraint_id in targets {
            handles.push(self.add_slack_pair(&block, constraint_id)?);
        }

        self.deactivate_objectives();
        let slack_sum = linear_sum(
            handles
                .iter()
                .flat_map(|handle| handle.variables())
                .map(Expr::var),
        );
        let objective = self.add_objective(
            qualified_name(&block, "_slack_objective"),
            Sense::Minimize,
            slack_sum,
        )?;

        tracing::debug!(
            component = "transform",
            operation = "elasticize",
            status = "success",
            block = %block,
            constraints = handles.len(),
            "Elasticized model"
        );
        Ok(ElasticBlock {
            block,
            objective,
            handles,
        })
    }

    /// Constraint that owns an elastic slack variable.
    pub fn slack_owner(&self, variable: VariableId) -> Result<ConstraintId, ModelError> {
        self.slack_owners
            .get(&variable)
            .copied()
            .ok_or(ModelError::UnknownSlack(variable))
    }

    fn add_slack_pair(
        &mut self,
        block: &str,
        constraint_id: ConstraintId,
    ) -> Result<SlackHandle, ModelError> {
        let bounds = self.get_constraint(constraint_id)?.bounds;
        let con_name = self
            .get_constraint_name(constraint_id)
            .ok_or(ModelError::InvalidConstraintId(constraint_id))?
            .to_string();

        let plus = if bounds.has_lower() {
            Some(self.add_slack_variable(block, "_slack_plus_", &con_name, constraint_id)?)
        } else {
            None
        };
        let minus = if bounds.has_upper() {
            Some(self.add_slack_variable(block, "_slack_minus_", &con_name, constraint_id)?)
        } else {
            None
        };

        let constraint = self.constraint_mut(constraint_id)?;
        if let Some(plus) = plus {
            constraint.body.push_term(plus, 1.0);
        }
        if let Some(minus) = minus {
            constraint.body.push_term(minus, -1.0);
        }

        Ok(SlackHandle {
            constraint_id,
            plus,
            minus,
        })
    }

    fn add_slack_variable(
        &mut self,
        block: &str,
        prefix: &str,
        con_name: &str,
        owner: ConstraintId,
    ) -> Result<VariableId, ModelError> {
        let name = qualified_name(block, &format!("{prefix}{con_name}"));
        let slack = Variable::in_domain(Domain::NonNegativeReals).with_value(0.0);
        let id = self.add_variable(name, slack)?;
        self.slack_owners.insert(id, owner);
        Ok(id)
    }
}
