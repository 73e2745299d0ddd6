//! Solver trait for abstraction over different solver backends.

use elastica_core::Model;

use crate::{Solution, SolverConfig, SolverError};

/// Trait for solver implementations.
///
/// A solve has three outcomes: `Ok` with an optimal solution, `Ok` with any
/// other status, or `Err`. [`SolverError::EvaluationFailure`] is the only
/// error a caller is expected to recover from.
pub trait Solve {
    /// Backend name used in logs and registry lookups.
    fn name(&self) -> &str;

    /// Solve the active part of `model`.
    ///
    /// Fixed variables are held at their values and inactive constraints and
    /// objectives are ignored. The model is not modified.
    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError>;
}

impl<S: Solve + ?Sized> Solve for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        (**self).solve(model, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolverStatus;

    struct FixtureSolver {
        status: SolverStatus,
        calls: usize,
    }

    impl Solve for FixtureSolver {
        fn name(&self) -> &str {
            "fixture"
        }

        fn solve(
            &mut self,
            _model: &Model,
            _config: &SolverConfig,
        ) -> Result<Solution, SolverError> {
            self.calls += 1;
            Ok(Solution::with_status(self.status))
        }
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut solver = FixtureSolver {
            status: SolverStatus::Infeasible,
            calls: 0,
        };
        let model = Model::new();
        let dynamic: &mut dyn Solve = &mut solver;
        let solution = dynamic.solve(&model, &SolverConfig::new()).unwrap();
        assert_eq!(dynamic.name(), "fixture");
        assert!(!solution.is_optimal());
        assert_eq!(solver.calls, 1);
    }

    #[test]
    fn test_boxed_solver_delegates() {
        let mut boxed: Box<dyn Solve> = Box::new(FixtureSolver {
            status: SolverStatus::Optimal,
            calls: 0,
        });
        let solution = boxed.solve(&Model::new(), &SolverConfig::new()).unwrap();
        assert!(solution.is_optimal());
        assert_eq!(Solve::name(&boxed), "fixture");
    }
}
