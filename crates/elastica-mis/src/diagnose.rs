//! Entry point tying the transforms, relaxation and deletion filter together.

use std::collections::BTreeMap;

use elastica_core::{Model, VariableId};
use elastica_solver::{Solve, SolverConfig};
use elastica_tools::MemoryProbe;

use crate::crossref::{ValueCache, VariableMap};
use crate::deletion::{DeletionOutcome, run_deletion_filter};
use crate::outcome::{SolveOutcome, solve_and_load};
use crate::relax::{Relaxation, relax};
use crate::report::{InfeasibilityReport, ItemResolver, Outcome};
use crate::{DiagnosisError, DiagnosisOptions};

/// Explain why `model` is infeasible.
///
/// All work happens on a clone: its variable bounds become constraints, every
/// constraint gets a slack pair, and staged relaxation followed by a deletion
/// filter isolates a Minimal Intractable System. `model` keeps its variable
/// values unless it turns out to be feasible, in which case the solution is
/// loaded into it. The report is also logged at info level.
pub fn compute_infeasibility_explanation(
    model: &mut Model,
    solver: &mut dyn Solve,
    options: &DiagnosisOptions,
) -> Result<InfeasibilityReport, DiagnosisError> {
    let snapshot = model.values();
    let result = diagnose(model, solver, options, &snapshot);

    let keep_values = matches!(&result, Ok(report) if report.is_feasible());
    if !keep_values {
        model.restore_values(&snapshot)?;
    }

    match &result {
        Ok(report) => tracing::info!(
            component = "mis",
            operation = "compute_infeasibility_explanation",
            status = report.outcome.as_str(),
            model = model.name(),
            "{}",
            report
        ),
        Err(err) => tracing::error!(
            component = "mis",
            operation = "compute_infeasibility_explanation",
            status = "error",
            model = model.name(),
            code = err.code(),
            error = %err,
            "Diagnosis failed"
        ),
    }
    result
}

fn diagnose(
    model: &mut Model,
    solver: &mut dyn Solve,
    options: &DiagnosisOptions,
    snapshot: &BTreeMap<VariableId, Option<f64>>,
) -> Result<InfeasibilityReport, DiagnosisError> {
    let mut probe = MemoryProbe::new();
    probe.record("start");
    let config = options.effective_solver_config();

    let mut clone = model.clone();
    let variables = VariableMap::build(model, &clone)?;
    let cache = ValueCache::capture(model, &variables)?;
    cache.reset(&mut clone)?;

    let bounds = clone.bounds_as_constraints()?;
    let elastic = clone.elasticize()?;
    probe.record("transform");
    tracing::debug!(
        component = "mis",
        operation = "transform",
        status = "success",
        model = model.name(),
        solver = solver.name(),
        bound_constraints = bounds.constraints.len(),
        slack_pairs = elastic.handles.len(),
        memory_delta_bytes = probe.last_diff(),
        "Built elastic working copy"
    );

    let relaxation = relax(
        &mut clone,
        &elastic,
        solver,
        &config,
        &cache,
        options.tolerance,
    )?;
    probe.record("relaxation");

    let resolver = ItemResolver {
        original: &*model,
        clone: &clone,
        variables: &variables,
    };
    let relaxed_sets = relaxation
        .rounds
        .iter()
        .map(|round| resolver.relaxed_set(round))
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = if relaxation.elastic_filter.is_empty() {
        write_back(model, &clone, &variables, &relaxation, solver, &config, snapshot)?
    } else {
        let deletion = run_deletion_filter(
            &mut clone,
            &elastic,
            &relaxation.elastic_filter,
            solver,
            &config,
            &cache,
        )?;
        probe.record("deletion");
        let resolver = ItemResolver {
            original: &*model,
            clone: &clone,
            variables: &variables,
        };
        match deletion {
            DeletionOutcome::Undetermined => Outcome::MisUndetermined,
            DeletionOutcome::Mis { members, guards } => Outcome::Mis {
                members: resolver.resolve_all(&members)?,
                guards: resolver.resolve_all(&guards)?,
            },
        }
    };

    tracing::debug!(
        component = "mis",
        operation = "diagnose",
        status = outcome.as_str(),
        model = model.name(),
        memory_total_delta_bytes = probe.total_diff(),
        "Diagnosis finished"
    );
    Ok(InfeasibilityReport {
        model_name: model.name().to_string(),
        relaxed_sets,
        outcome,
    })
}

/// Nothing was relaxed: confirm on the caller's model and keep its solution.
fn write_back(
    model: &mut Model,
    clone: &Model,
    variables: &VariableMap,
    relaxation: &Relaxation,
    solver: &mut dyn Solve,
    config: &SolverConfig,
    snapshot: &BTreeMap<VariableId, Option<f64>>,
) -> Result<Outcome, DiagnosisError> {
    if !relaxation.feasible_without_relaxation {
        warn_unstable(model, "no relaxation solve was optimal");
        return Ok(Outcome::Unstable);
    }

    variables.copy_to_original(clone, model)?;
    match solve_and_load(solver, model, config, "write_back")? {
        SolveOutcome::Optimal => Ok(Outcome::Feasible),
        SolveOutcome::NotOptimal(_) | SolveOutcome::EvaluationFailure(_) => {
            model.restore_values(snapshot)?;
            warn_unstable(model, "original model did not solve from the relaxed point");
            Ok(Outcome::Unstable)
        }
    }
}

fn warn_unstable(model: &Model, reason: &str) {
    tracing::warn!(
        component = "mis",
        operation = "write_back",
        status = "unstable",
        model = model.name(),
        reason,
        "Model is likely unstable"
    );
}
