#![allow(clippy::float_cmp)]

use std::collections::BTreeSet;

use elastica_core::{Bounds, Expr, Model, Variable};
use elastica_highs::HighsSolver;
use elastica_mis::{
    DiagnosisError, DiagnosisOptions, Outcome, RelaxationScope, ReportItem,
    compute_infeasibility_explanation,
};
use elastica_solver::{
    Serialization, Solution, Solve, SolverConfig, SolverError, SolverStatus,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn item_set(items: &[ReportItem]) -> BTreeSet<ReportItem> {
    items.iter().cloned().collect()
}

/// A single variable whose bounds contradict each other: `5 <= x <= 2`.
fn inverted_bounds_model() -> Model {
    let mut model = Model::named("inverted");
    model
        .add_variable(
            "x",
            Variable::continuous(Bounds::new(5.0, 2.0)).with_value(1.5),
        )
        .unwrap();
    model
}

/// Free `x`, `y` with `x + y == 10`, `x <= 3`, `y <= 3`.
fn capped_sum_model() -> Model {
    let mut model = Model::named("capped");
    let x = model.add_variable("x", Variable::default().with_value(1.0)).unwrap();
    let y = model.add_variable("y", Variable::default().with_value(2.0)).unwrap();
    model
        .add_constraint("sum", (Expr::var(x) + Expr::var(y)).eq_scalar(10.0))
        .unwrap();
    model.add_constraint("cap_x", Expr::var(x).le_scalar(3.0)).unwrap();
    model.add_constraint("cap_y", Expr::var(y).le_scalar(3.0)).unwrap();
    model
}

/// Feasible: `x, y` in `[0, 10]`, `x + y == 10`, minimizing `x`.
fn feasible_model() -> Model {
    let mut model = Model::named("pair");
    let x = model
        .add_variable(
            "x",
            Variable::continuous(Bounds::new(0.0, 10.0)).with_value(4.0),
        )
        .unwrap();
    let y = model
        .add_variable(
            "y",
            Variable::continuous(Bounds::new(0.0, 10.0)).with_value(4.0),
        )
        .unwrap();
    model
        .add_constraint("sum", (Expr::var(x) + Expr::var(y)).eq_scalar(10.0))
        .unwrap();
    model.minimize(Expr::var(x)).unwrap();
    model
}

fn constraint_active(model: &Model, name: &str) -> bool {
    model
        .get_constraint_by_name(name)
        .and_then(|id| model.get_constraint(id).ok())
        .is_some_and(|constraint| constraint.active)
}

fn objective_active(model: &Model) -> bool {
    matches!(model.active_objective(), Ok(Some(_)))
}

/// Delegates to HiGHS, but cannot evaluate the model while `fragile` is inactive.
struct FragileSolver {
    inner: HighsSolver,
    fragile: &'static str,
}

impl Solve for FragileSolver {
    fn name(&self) -> &str {
        "fragile"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        if !constraint_active(model, self.fragile) {
            return Err(SolverError::EvaluationFailure {
                constraint: Some(self.fragile.to_string()),
                message: "log of negative argument".to_string(),
            });
        }
        self.inner.solve(model, config)
    }
}

/// Delegates to HiGHS and records the configuration of every solve.
#[derive(Default)]
struct RecordingSolver {
    inner: HighsSolver,
    calls: Vec<(bool, SolverConfig)>,
}

impl Solve for RecordingSolver {
    fn name(&self) -> &str {
        "recording"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        self.calls.push((objective_active(model), config.clone()));
        self.inner.solve(model, config)
    }
}

/// Claims optimality for any model without an active objective.
struct OptimisticSolver {
    inner: HighsSolver,
}

impl Solve for OptimisticSolver {
    fn name(&self) -> &str {
        "optimistic"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        if objective_active(model) {
            self.inner.solve(model, config)
        } else {
            Ok(Solution::with_status(SolverStatus::Optimal))
        }
    }
}

/// Always returns the same status or error.
struct FixedSolver {
    result: Result<SolverStatus, SolverError>,
}

impl Solve for FixedSolver {
    fn name(&self) -> &str {
        "fixed"
    }

    fn solve(&mut self, _model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
        self.result.clone().map(Solution::with_status)
    }
}

#[test]
fn test_inverted_bounds_form_the_mis() {
    let mut model = inverted_bounds_model();
    let report = compute_infeasibility_explanation(
        &mut model,
        &mut HighsSolver::new(),
        &DiagnosisOptions::new(),
    )
    .unwrap();

    assert_eq!(
        item_set(report.mis().unwrap()),
        item_set(&[ReportItem::lower_bound("x"), ReportItem::upper_bound("x")])
    );
    assert!(report.guards().unwrap().is_empty());

    assert!(!report.relaxed_sets.is_empty());
    let first = &report.relaxed_sets[0];
    assert_eq!(first.scope, RelaxationScope::VariableBounds);
    let relaxed_total: f64 = first.items.iter().map(|relaxed| relaxed.amount).sum();
    assert_close(relaxed_total, 3.0);

    let text = report.to_string();
    assert!(text.starts_with(
        "Model inverted may be infeasible. A feasible solution was found with only the following variable bounds relaxed:\n"
    ));
    assert!(text.contains("Computed Minimal Intractable System (MIS)!\n"));
    assert!(text.contains("\tlower bound of variable x\n"));
    assert!(text.contains("\tupper bound of variable x\n"));
}

#[test]
fn test_original_model_is_left_untouched() {
    let mut model = inverted_bounds_model();
    let x = model.get_variable_by_name("x").unwrap();
    compute_infeasibility_explanation(
        &mut model,
        &mut HighsSolver::new(),
        &DiagnosisOptions::new(),
    )
    .unwrap();

    assert_eq!(model.num_variables(), 1);
    assert_eq!(model.num_constraints(), 0);
    let variable = model.get_variable(x).unwrap();
    assert_eq!(variable.value, Some(1.5));
    assert_eq!(variable.bounds, Bounds::new(5.0, 2.0));
    assert!(!variable.fixed);
}

#[test]
fn test_capped_sum_needs_all_three_constraints() {
    let mut model = capped_sum_model();
    let report = compute_infeasibility_explanation(
        &mut model,
        &mut HighsSolver::new(),
        &DiagnosisOptions::new(),
    )
    .unwrap();

    assert_eq!(
        item_set(report.mis().unwrap()),
        item_set(&[
            ReportItem::constraint("sum"),
            ReportItem::constraint("cap_x"),
            ReportItem::constraint("cap_y"),
        ])
    );
    assert!(report.guards().unwrap().is_empty());

    // Equality constraints are only relaxed in the last phase.
    for set in &report.relaxed_sets {
        if set.scope != RelaxationScope::All {
            assert!(
                set.items
                    .iter()
                    .all(|relaxed| relaxed.item != ReportItem::constraint("sum"))
            );
        }
        assert!(set.items.iter().all(|relaxed| relaxed.amount > 1e-8));
    }

    // Each item is relaxed at most once across all rounds.
    let relaxed: Vec<&ReportItem> = report
        .relaxed_sets
        .iter()
        .flat_map(|set| set.items.iter().map(|relaxed| &relaxed.item))
        .collect();
    let unique: BTreeSet<&ReportItem> = relaxed.iter().copied().collect();
    assert_eq!(relaxed.len(), unique.len());
    assert_eq!(unique.len(), 3);

    assert_eq!(model.value(model.get_variable_by_name("x").unwrap()).unwrap(), Some(1.0));
    assert!(constraint_active(&model, "sum"));
}

#[test]
fn test_feasible_model_gets_solution_loaded() {
    let mut model = feasible_model();
    let x = model.get_variable_by_name("x").unwrap();
    let y = model.get_variable_by_name("y").unwrap();

    let report = compute_infeasibility_explanation(
        &mut model,
        &mut HighsSolver::new(),
        &DiagnosisOptions::new(),
    )
    .unwrap();

    assert_eq!(report.outcome, Outcome::Feasible);
    assert!(report.relaxed_sets.is_empty());
    assert_close(model.value(x).unwrap().unwrap(), 0.0);
    assert_close(model.value(y).unwrap().unwrap(), 10.0);
    assert!(objective_active(&model));
    assert_eq!(
        report.to_string(),
        "Model pair may be feasible: no constraint or variable bound had to be relaxed.\n\
         Feasible solution found and loaded into model pair.\n"
    );
}

#[test]
fn test_evaluation_failure_in_deletion_makes_a_guard() {
    let mut model = capped_sum_model();
    let mut solver = FragileSolver {
        inner: HighsSolver::new(),
        fragile: "cap_y",
    };
    let report =
        compute_infeasibility_explanation(&mut model, &mut solver, &DiagnosisOptions::new())
            .unwrap();

    assert_eq!(
        item_set(report.mis().unwrap()),
        item_set(&[ReportItem::constraint("sum"), ReportItem::constraint("cap_x")])
    );
    assert_eq!(report.guards().unwrap(), &[ReportItem::constraint("cap_y")]);
    assert!(
        report
            .to_string()
            .ends_with("Constraints / bounds in guards for stability:\n\tconstraint: cap_y\n")
    );
}

#[test]
fn test_feasible_filter_leaves_mis_undetermined() {
    let mut model = inverted_bounds_model();
    let x = model.get_variable_by_name("x").unwrap();
    let mut solver = OptimisticSolver {
        inner: HighsSolver::new(),
    };
    let report =
        compute_infeasibility_explanation(&mut model, &mut solver, &DiagnosisOptions::new())
            .unwrap();

    assert_eq!(report.outcome, Outcome::MisUndetermined);
    assert!(!report.relaxed_sets.is_empty());
    assert!(
        report
            .to_string()
            .ends_with("Could not determine Minimal Intractable System\n")
    );
    assert_eq!(model.value(x).unwrap(), Some(1.5));
}

#[test]
fn test_solver_that_never_succeeds_is_unstable() {
    let mut model = capped_sum_model();
    let mut solver = FixedSolver {
        result: Ok(SolverStatus::Infeasible),
    };
    let report =
        compute_infeasibility_explanation(&mut model, &mut solver, &DiagnosisOptions::new())
            .unwrap();

    assert_eq!(report.outcome, Outcome::Unstable);
    assert!(report.relaxed_sets.is_empty());
    assert_eq!(
        report.to_string(),
        "Could not find a feasible solution with violated constraints or bounds. \
         This model is likely unstable.\n"
    );
}

#[test]
fn test_evaluation_failure_during_relaxation_is_an_error() {
    let mut model = capped_sum_model();
    let x = model.get_variable_by_name("x").unwrap();
    let mut solver = FixedSolver {
        result: Err(SolverError::EvaluationFailure {
            constraint: None,
            message: "division by zero".to_string(),
        }),
    };
    let err = compute_infeasibility_explanation(&mut model, &mut solver, &DiagnosisOptions::new())
        .unwrap_err();

    assert!(matches!(
        err,
        DiagnosisError::Solver(SolverError::EvaluationFailure { .. })
    ));
    assert_eq!(model.value(x).unwrap(), Some(1.0));
}

#[test]
fn test_unsupported_model_propagates() {
    let mut model = capped_sum_model();
    let mut solver = FixedSolver {
        result: Err(SolverError::Unsupported("nonlinear constraint".to_string())),
    };
    let err = compute_infeasibility_explanation(&mut model, &mut solver, &DiagnosisOptions::new())
        .unwrap_err();
    assert_eq!(err.code(), "DIAGNOSIS_SOLVER");
}

#[test]
fn test_deletion_filter_uses_legacy_serialization_only() {
    let mut model = capped_sum_model();
    let mut solver = RecordingSolver::default();
    let options = DiagnosisOptions::new()
        .with_tee(true)
        .with_solver_config(SolverConfig::new().with_time_limit(30.0));

    compute_infeasibility_explanation(&mut model, &mut solver, &options).unwrap();

    assert_eq!(options.solver_config.serialization, Serialization::Standard);
    assert_eq!(options.solver_config.log_to_console, None);

    let (relaxation, deletion): (Vec<_>, Vec<_>) =
        solver.calls.iter().partition(|(objective, _)| *objective);
    assert!(!relaxation.is_empty());
    // Confirmation solve plus one solve per candidate.
    assert_eq!(deletion.len(), 4);
    for (_, config) in &relaxation {
        assert_eq!(config.serialization, Serialization::Standard);
    }
    for (_, config) in &deletion {
        assert_eq!(config.serialization, Serialization::Legacy);
    }
    for (_, config) in &solver.calls {
        assert!(config.tee());
        assert_eq!(config.time_limit, Some(30.0));
    }
}
