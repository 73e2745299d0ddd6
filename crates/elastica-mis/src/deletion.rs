//! Deletion filter over the elastic filter.
//!
//! With every slack pinned at zero and only the elastic filter active, each
//! member is dropped in turn. If the model becomes solvable the member is
//! necessary and goes back in; if the solver cannot evaluate the model the
//! member is kept as a stability guard; otherwise it stays out.

use elastica_core::{ConstraintId, ElasticBlock, Model};
use elastica_solver::{Serialization, Solve, SolverConfig};

use crate::DiagnosisError;
use crate::crossref::ValueCache;
use crate::outcome::{SolveOutcome, solve_and_load};
use crate::relax::ElasticFilter;

/// Result of the deletion filter, in clone-side constraint ids.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// The filter alone is solvable, so it does not explain the infeasibility.
    Undetermined,
    Mis {
        members: Vec<ConstraintId>,
        guards: Vec<ConstraintId>,
    },
}

/// Shrink `filter` to an irreducible infeasible subset of `model`'s constraints.
///
/// `model` must be the elasticized clone after relaxation. Every solve uses a
/// copy of `config` switched to [`Serialization::Legacy`].
pub fn run_deletion_filter(
    model: &mut Model,
    elastic: &ElasticBlock,
    filter: &ElasticFilter,
    solver: &mut dyn Solve,
    config: &SolverConfig,
    cache: &ValueCache,
) -> Result<DeletionOutcome, DiagnosisError> {
    let config = config.clone().with_serialization(Serialization::Legacy);

    for slack in elastic.slack_variables() {
        model.fix_variable(slack, 0.0)?;
    }
    model.deactivate_objectives();

    let outside: Vec<ConstraintId> = model
        .active_constraints()
        .map(|(id, _)| id)
        .filter(|id| !filter.contains(*id))
        .collect();
    for id in &outside {
        model.deactivate_constraint(*id)?;
    }

    let confirm = solve_and_load(solver, model, &config, "deletion_confirm")?;
    if confirm.is_optimal() {
        tracing::warn!(
            component = "mis",
            operation = "deletion_filter",
            status = "undetermined",
            members = filter.len(),
            "Elastic filter is feasible on its own"
        );
        return Ok(DeletionOutcome::Undetermined);
    }

    let mut members = Vec::new();
    let mut guards = Vec::new();
    for constraint in filter.iter() {
        model.deactivate_constraint(constraint)?;
        cache.reset(model)?;
        match solve_and_load(solver, model, &config, "deletion_sweep")? {
            SolveOutcome::EvaluationFailure(_) => {
                model.activate_constraint(constraint)?;
                guards.push(constraint);
            }
            SolveOutcome::Optimal => {
                model.activate_constraint(constraint)?;
                members.push(constraint);
            }
            SolveOutcome::NotOptimal(_) => {}
        }
    }

    tracing::info!(
        component = "mis",
        operation = "deletion_filter",
        status = "success",
        candidates = filter.len(),
        members = members.len(),
        guards = guards.len(),
        "Deletion filter finished"
    );
    Ok(DeletionOutcome::Mis { members, guards })
}
