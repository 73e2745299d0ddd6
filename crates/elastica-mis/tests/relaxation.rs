#![allow(clippy::float_cmp)]

use std::collections::BTreeSet;

use elastica_core::{ElasticBlock, Expr, Model, SlackHandle, Variable};
use elastica_highs::HighsSolver;
use elastica_mis::{
    DEFAULT_TOLERANCE, DiagnosisError, RelaxationScope, ValueCache, VariableMap, relax,
};
use elastica_solver::{Solution, Solve, SolverConfig, SolverError, SolverStatus};

fn capped_sum_model() -> Model {
    let mut model = Model::named("capped");
    let x = model.add_variable("x", Variable::default()).unwrap();
    let y = model.add_variable("y", Variable::default()).unwrap();
    model
        .add_constraint("sum", (Expr::var(x) + Expr::var(y)).eq_scalar(10.0))
        .unwrap();
    model.add_constraint("cap_x", Expr::var(x).le_scalar(3.0)).unwrap();
    model.add_constraint("cap_y", Expr::var(y).le_scalar(3.0)).unwrap();
    model
}

/// Clone of `original` with bounds as constraints and slacks attached.
fn elastic_copy(original: &Model) -> (Model, ElasticBlock, ValueCache) {
    let mut clone = original.clone();
    let map = VariableMap::build(original, &clone).unwrap();
    let cache = ValueCache::capture(original, &map).unwrap();
    clone.bounds_as_constraints().unwrap();
    let elastic = clone.elasticize().unwrap();
    (clone, elastic, cache)
}

#[test]
fn test_filter_grows_by_disjoint_rounds() {
    let original = capped_sum_model();
    let (mut clone, elastic, cache) = elastic_copy(&original);

    let relaxation = relax(
        &mut clone,
        &elastic,
        &mut HighsSolver::new(),
        &SolverConfig::new(),
        &cache,
        DEFAULT_TOLERANCE,
    )
    .unwrap();

    let recorded: Vec<_> = relaxation
        .rounds
        .iter()
        .flat_map(|round| round.violations.iter().map(|violation| violation.constraint))
        .collect();
    assert_eq!(recorded, relaxation.elastic_filter.as_slice());
    assert_eq!(recorded.iter().collect::<BTreeSet<_>>().len(), 3);
    assert!(!relaxation.feasible_without_relaxation);

    // Phases never go backwards.
    let scopes: Vec<RelaxationScope> = relaxation.rounds.iter().map(|round| round.scope).collect();
    let mut sorted = scopes.clone();
    sorted.sort();
    assert_eq!(scopes, sorted);

    // Every recorded constraint has its whole slack pair pinned at zero.
    for constraint in relaxation.elastic_filter.iter() {
        let handle = elastic.handle_for(constraint).unwrap();
        for slack in handle.variables() {
            let variable = clone.get_variable(slack).unwrap();
            assert!(variable.fixed);
            assert_eq!(variable.value, Some(0.0));
        }
    }
}

#[test]
fn test_feasible_model_needs_no_relaxation() {
    let mut original = Model::named("easy");
    let x = original.add_variable("x", Variable::default()).unwrap();
    original.add_constraint("floor", Expr::var(x).ge_scalar(1.0)).unwrap();
    let (mut clone, elastic, cache) = elastic_copy(&original);

    let relaxation = relax(
        &mut clone,
        &elastic,
        &mut HighsSolver::new(),
        &SolverConfig::new(),
        &cache,
        DEFAULT_TOLERANCE,
    )
    .unwrap();

    assert!(relaxation.rounds.is_empty());
    assert!(relaxation.elastic_filter.is_empty());
    assert!(relaxation.feasible_without_relaxation);
}

/// Returns the same solution on every solve.
struct PlantedSolver {
    solution: Solution,
}

impl Solve for PlantedSolver {
    fn name(&self) -> &str {
        "planted"
    }

    fn solve(&mut self, _model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
        Ok(self.solution.clone())
    }
}

#[test]
fn test_foreign_slack_is_a_structural_error() {
    let mut model = Model::named("broken");
    let x = model.add_variable("x", Variable::default()).unwrap();
    let cap = model.add_constraint("cap", Expr::var(x).le_scalar(1.0)).unwrap();
    let objective = model.minimize(Expr::var(x)).unwrap();
    let map = VariableMap::build(&model, &model).unwrap();
    let cache = ValueCache::capture(&model, &map).unwrap();

    // `x` is not a slack created by elasticization.
    let elastic = ElasticBlock {
        block: "fake".to_string(),
        objective,
        handles: vec![SlackHandle {
            constraint_id: cap,
            plus: None,
            minus: Some(x),
        }],
    };
    let mut solution = Solution::with_status(SolverStatus::Optimal);
    solution.values.insert(x, 5.0);
    let mut solver = PlantedSolver { solution };

    let err = relax(
        &mut model,
        &elastic,
        &mut solver,
        &SolverConfig::new(),
        &cache,
        DEFAULT_TOLERANCE,
    )
    .unwrap_err();
    assert!(matches!(err, DiagnosisError::Structural(_)));
}

#[test]
fn test_violation_at_tolerance_is_not_recorded() {
    let mut original = Model::named("edge");
    let x = original.add_variable("x", Variable::default()).unwrap();
    original.add_constraint("cap", Expr::var(x).le_scalar(1.0)).unwrap();
    let (mut clone, elastic, cache) = elastic_copy(&original);
    let slack = elastic.handles[0].minus.unwrap();

    let mut solution = Solution::with_status(SolverStatus::Optimal);
    solution.values.insert(slack, 1e-3);
    let mut solver = PlantedSolver { solution };

    let relaxation = relax(&mut clone, &elastic, &mut solver, &SolverConfig::new(), &cache, 1e-3)
        .unwrap();
    assert!(relaxation.elastic_filter.is_empty());
    assert!(relaxation.feasible_without_relaxation);
}
