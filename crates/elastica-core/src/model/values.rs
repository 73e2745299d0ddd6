//! Variable values and fixing.

use std::collections::BTreeMap;

use elastica_expr::ids::VariableId;

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Current value of a variable.
    pub fn value(&self, id: VariableId) -> Result<Option<f64>, ModelError> {
        Ok(self.get_variable(id)?.value)
    }

    pub fn set_value(&mut self, id: VariableId, value: Option<f64>) -> Result<(), ModelError> {
        self.variable_mut(id)?.value = value;
        Ok(())
    }

    /// Pin a variable at `value`.
    pub fn fix_variable(&mut self, id: VariableId, value: f64) -> Result<(), ModelError> {
        let var = self.variable_mut(id)?;
        var.value = Some(value);
        var.fixed = true;
        Ok(())
    }

    /// Release a fixed variable, keeping its current value.
    pub fn unfix_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.variable_mut(id)?.fixed = false;
        Ok(())
    }

    /// Snapshot of every variable value.
    pub fn values(&self) -> BTreeMap<VariableId, Option<f64>> {
        self.variables
            .iter()
            .map(|(id, var)| (*id, var.value))
            .collect()
    }

    /// Write back a snapshot taken with [`Model::values`].
    pub fn restore_values(
        &mut self,
        snapshot: &BTreeMap<VariableId, Option<f64>>,
    ) -> Result<(), ModelError> {
        for (id, value) in snapshot {
            self.set_value(*id, *value)?;
        }
        Ok(())
    }

    /// Lookup closure suitable for [`elastica_expr::Expr::evaluate`].
    pub fn value_lookup(&self) -> impl Fn(VariableId) -> Option<f64> + '_ {
        move |id| self.variables.get(&id).and_then(|var| var.value)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::Variable;
    use elastica_expr::Expr;

    #[test]
    fn snapshot_and_restore_round_trip() {
        let mut model = Model::new();
        let x = model.add_variable("x", Variable::default().with_value(1.0)).unwrap();
        let y = model.add_variable("y", Variable::default()).unwrap();

        let snapshot = model.values();
        model.set_value(x, Some(9.0)).unwrap();
        model.set_value(y, Some(2.0)).unwrap();

        model.restore_values(&snapshot).unwrap();
        assert_eq!(model.value(x).unwrap(), Some(1.0));
        assert_eq!(model.value(y).unwrap(), None);
    }

    #[test]
    fn value_lookup_evaluates_expressions() {
        let mut model = Model::new();
        let x = model.add_variable("x", Variable::default().with_value(3.0)).unwrap();
        let expr = Expr::var(x) * 2.0 + Expr::from_constant(1.0);
        assert_eq!(expr.evaluate(model.value_lookup()).unwrap(), 7.0);
    }

    #[test]
    fn set_value_on_unknown_variable_fails() {
        let mut model = Model::new();
        let missing = VariableId::new(7);
        assert_eq!(
            model.set_value(missing, Some(1.0)),
            Err(ModelError::InvalidVariableId(missing))
        );
    }
}
