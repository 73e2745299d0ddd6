//! Solver-agnostic solve result.

use std::collections::BTreeMap;

use elastica_core::{Model, ModelError, VariableId};

use crate::SolverStatus;

/// Result of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolverStatus,
    /// Objective value; `0.0` for a model without an active objective.
    pub objective_value: f64,
    /// Primal values of the variables the backend saw.
    pub values: BTreeMap<VariableId, f64>,
    /// Solve time in seconds.
    pub solve_time_seconds: f64,
    /// Solver-agnostic metadata (e.g., iteration counts).
    pub metadata: BTreeMap<String, f64>,
}

impl Solution {
    /// Empty solution with the given status.
    pub fn with_status(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: 0.0,
            values: BTreeMap::new(),
            solve_time_seconds: 0.0,
            metadata: BTreeMap::new(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn value(&self, id: VariableId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// Write the primal values into `model`'s variable values.
    pub fn load_into(&self, model: &mut Model) -> Result<(), ModelError> {
        for (id, value) in &self.values {
            model.set_value(*id, Some(*value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use elastica_core::Variable;

    #[test]
    fn test_load_into_sets_values() {
        let mut model = Model::new();
        let x = model.add_variable("x", Variable::default()).unwrap();
        let y = model.add_variable("y", Variable::default().with_value(4.0)).unwrap();

        let mut solution = Solution::with_status(SolverStatus::Optimal);
        solution.values.insert(x, 2.5);
        solution.load_into(&mut model).unwrap();

        assert_eq!(model.value(x).unwrap(), Some(2.5));
        assert_eq!(model.value(y).unwrap(), Some(4.0));
        assert_eq!(solution.value(x), Some(2.5));
        assert!(solution.is_optimal());
    }

    #[test]
    fn test_load_into_rejects_foreign_variable() {
        let mut model = Model::new();
        let mut solution = Solution::with_status(SolverStatus::Optimal);
        solution.values.insert(VariableId::new(3), 1.0);
        assert!(solution.load_into(&mut model).is_err());
    }
}
