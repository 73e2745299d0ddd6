//! Three-way classification of a single solve.

use elastica_core::Model;
use elastica_solver::{Solve, SolverConfig, SolverError, SolverStatus};

use crate::DiagnosisError;

/// How one solve ended.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SolveOutcome {
    /// Optimal; the primal values are already loaded into the model.
    Optimal,
    /// Any other termination status.
    NotOptimal(SolverStatus),
    /// The backend could not evaluate the model at its current point.
    EvaluationFailure(SolverError),
}

impl SolveOutcome {
    pub(crate) fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal)
    }
}

/// Solve `model`, loading the solution into it when optimal.
///
/// Evaluation failures are returned as an outcome; every other solver error
/// propagates.
pub(crate) fn solve_and_load(
    solver: &mut dyn Solve,
    model: &mut Model,
    config: &SolverConfig,
    stage: &str,
) -> Result<SolveOutcome, DiagnosisError> {
    let solution = match solver.solve(model, config) {
        Ok(solution) => solution,
        Err(err) if err.is_evaluation_failure() => {
            tracing::debug!(
                component = "mis",
                operation = "solve",
                status = "evaluation_failure",
                stage,
                solver = solver.name(),
                error = %err,
                "Solve could not evaluate the model"
            );
            return Ok(SolveOutcome::EvaluationFailure(err));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::debug!(
        component = "mis",
        operation = "solve",
        status = solution.status.as_str(),
        stage,
        solver = solver.name(),
        objective = solution.objective_value,
        serialization = config.serialization.as_str(),
        "Solve finished"
    );

    if solution.is_optimal() {
        solution.load_into(model)?;
        Ok(SolveOutcome::Optimal)
    } else {
        Ok(SolveOutcome::NotOptimal(solution.status))
    }
}

/// Like [`solve_and_load`], but an evaluation failure aborts the run.
pub(crate) fn solve_strict(
    solver: &mut dyn Solve,
    model: &mut Model,
    config: &SolverConfig,
    stage: &str,
) -> Result<bool, DiagnosisError> {
    match solve_and_load(solver, model, config, stage)? {
        SolveOutcome::Optimal => Ok(true),
        SolveOutcome::NotOptimal(_) => Ok(false),
        SolveOutcome::EvaluationFailure(err) => Err(err.into()),
    }
}
