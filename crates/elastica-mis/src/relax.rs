//! Staged relaxation of the elastic model.
//!
//! Every slack starts fixed at zero. Three phases release progressively more
//! slacks (bound constraints, then inequalities, then everything) and, after
//! each optimal solve, a constraint loop records the violated constraints,
//! pins their slack pairs back to zero and solves again until the model
//! becomes infeasible or nothing is violated.

use std::collections::BTreeSet;

use serde::Serialize;

use elastica_core::{ConstraintId, ElasticBlock, Model};
use elastica_solver::{Solve, SolverConfig};

use crate::DiagnosisError;
use crate::crossref::ValueCache;
use crate::outcome::solve_strict;

/// Which slacks a relaxation phase is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationScope {
    VariableBounds,
    Inequalities,
    All,
}

impl RelaxationScope {
    /// Phases in the order they run.
    pub const PHASES: [RelaxationScope; 3] = [
        RelaxationScope::VariableBounds,
        RelaxationScope::Inequalities,
        RelaxationScope::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelaxationScope::VariableBounds => "variable_bounds",
            RelaxationScope::Inequalities => "inequalities",
            RelaxationScope::All => "all",
        }
    }

    /// Human-readable description of what may be relaxed.
    pub fn describe(self) -> &'static str {
        match self {
            RelaxationScope::VariableBounds => "variable bounds",
            RelaxationScope::Inequalities => "inequality constraints and/or variable bounds",
            RelaxationScope::All => {
                "inequality constraints, equality constraints, and/or variable bounds"
            }
        }
    }

    fn admits(self, model: &Model, constraint: ConstraintId) -> Result<bool, DiagnosisError> {
        Ok(match self {
            RelaxationScope::VariableBounds => model.bound_origin(constraint).is_some(),
            RelaxationScope::Inequalities => !model.get_constraint(constraint)?.is_equality(),
            RelaxationScope::All => true,
        })
    }
}

/// A constraint that had to be relaxed, and by how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    pub constraint: ConstraintId,
    pub amount: f64,
}

/// Violations recorded after one optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationRound {
    pub scope: RelaxationScope,
    pub violations: Vec<Violation>,
}

/// Insertion-ordered set of constraints found violated during relaxation.
///
/// Members are only ever added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElasticFilter {
    members: Vec<ConstraintId>,
    index: BTreeSet<ConstraintId>,
}

impl ElasticFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member; returns `false` if it was already present.
    pub fn insert(&mut self, constraint: ConstraintId) -> bool {
        if !self.index.insert(constraint) {
            return false;
        }
        self.members.push(constraint);
        true
    }

    pub fn contains(&self, constraint: ConstraintId) -> bool {
        self.index.contains(&constraint)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.members.iter().copied()
    }

    pub fn as_slice(&self) -> &[ConstraintId] {
        &self.members
    }
}

/// Everything the relaxation learned about the model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relaxation {
    pub rounds: Vec<RelaxationRound>,
    pub elastic_filter: ElasticFilter,
    /// Some optimal solve needed no relaxation before any constraint was recorded.
    pub feasible_without_relaxation: bool,
}

/// Run the three relaxation phases on an elasticized `model`.
pub fn relax(
    model: &mut Model,
    elastic: &ElasticBlock,
    solver: &mut dyn Solve,
    config: &SolverConfig,
    cache: &ValueCache,
    tolerance: f64,
) -> Result<Relaxation, DiagnosisError> {
    let mut relaxer = Relaxer {
        model,
        elastic,
        solver,
        config,
        cache,
        tolerance,
        relaxation: Relaxation::default(),
    };

    relaxer.fix_all_slacks()?;
    for scope in RelaxationScope::PHASES {
        relaxer.run_phase(scope)?;
    }

    tracing::info!(
        component = "mis",
        operation = "relax",
        status = "success",
        rounds = relaxer.relaxation.rounds.len(),
        elastic_filter = relaxer.relaxation.elastic_filter.len(),
        feasible_without_relaxation = relaxer.relaxation.feasible_without_relaxation,
        "Relaxation finished"
    );
    Ok(relaxer.relaxation)
}

struct Relaxer<'a> {
    model: &'a mut Model,
    elastic: &'a ElasticBlock,
    solver: &'a mut dyn Solve,
    config: &'a SolverConfig,
    cache: &'a ValueCache,
    tolerance: f64,
    relaxation: Relaxation,
}

impl Relaxer<'_> {
    fn fix_all_slacks(&mut self) -> Result<(), DiagnosisError> {
        for slack in self.elastic.slack_variables() {
            self.model.fix_variable(slack, 0.0)?;
        }
        Ok(())
    }

    /// Unfix the slack pairs `scope` admits, skipping recorded constraints.
    fn release(&mut self, scope: RelaxationScope) -> Result<usize, DiagnosisError> {
        let elastic = self.elastic;
        let mut released = 0;
        for handle in &elastic.handles {
            if self.relaxation.elastic_filter.contains(handle.constraint_id)
                || !scope.admits(self.model, handle.constraint_id)?
            {
                continue;
            }
            for slack in handle.variables() {
                self.model.unfix_variable(slack)?;
            }
            released += 1;
        }
        Ok(released)
    }

    fn run_phase(&mut self, scope: RelaxationScope) -> Result<(), DiagnosisError> {
        let released = self.release(scope)?;
        let optimal = solve_strict(self.solver, self.model, self.config, scope.as_str())?;

        tracing::debug!(
            component = "mis",
            operation = "relax_phase",
            status = if optimal { "optimal" } else { "not_optimal" },
            scope = scope.as_str(),
            released,
            "Relaxation phase solved"
        );

        if optimal {
            self.constraint_loop(scope)?;
        }
        Ok(())
    }

    fn constraint_loop(&mut self, scope: RelaxationScope) -> Result<(), DiagnosisError> {
        loop {
            let violations = self.record_violations()?;
            if violations.is_empty() {
                if self.relaxation.elastic_filter.is_empty() {
                    self.relaxation.feasible_without_relaxation = true;
                }
                return Ok(());
            }

            tracing::debug!(
                component = "mis",
                operation = "constraint_loop",
                status = "violations",
                scope = scope.as_str(),
                count = violations.len(),
                "Recorded violated constraints"
            );
            self.relaxation.rounds.push(RelaxationRound { scope, violations });

            self.cache.reset(self.model)?;
            if !solve_strict(self.solver, self.model, self.config, scope.as_str())? {
                return Ok(());
            }
        }
    }

    /// Record every free slack above tolerance and pin its pair at zero.
    fn record_violations(&mut self) -> Result<Vec<Violation>, DiagnosisError> {
        let elastic = self.elastic;
        let mut violations = Vec::new();
        for handle in &elastic.handles {
            if self.relaxation.elastic_filter.contains(handle.constraint_id) {
                continue;
            }
            for slack in handle.variables() {
                let variable = self.model.get_variable(slack)?;
                if variable.fixed {
                    continue;
                }
                let amount = variable.value.unwrap_or(0.0);
                if amount > self.tolerance {
                    let owner = self.model.slack_owner(slack)?;
                    if owner != handle.constraint_id {
                        return Err(DiagnosisError::Structural(format!(
                            "slack {} belongs to {}, not {}",
                            slack, owner, handle.constraint_id
                        )));
                    }
                    violations.push(Violation {
                        constraint: owner,
                        amount,
                    });
                    self.relaxation.elastic_filter.insert(owner);
                    for paired in handle.variables() {
                        self.model.fix_variable(paired, 0.0)?;
                    }
                    break;
                }
            }
        }
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_insertion_order() {
        let mut filter = ElasticFilter::new();
        assert!(filter.insert(ConstraintId::new(3)));
        assert!(filter.insert(ConstraintId::new(1)));
        assert!(!filter.insert(ConstraintId::new(3)));
        assert_eq!(filter.as_slice(), &[ConstraintId::new(3), ConstraintId::new(1)]);
        assert_eq!(filter.len(), 2);
        assert!(filter.contains(ConstraintId::new(1)));
    }

    #[test]
    fn test_filter_membership_over_many_constraints() {
        let mut filter = ElasticFilter::new();
        for id in (0..500).rev() {
            assert!(filter.insert(ConstraintId::new(id * 2)));
        }
        assert_eq!(filter.len(), 500);
        assert!(filter.contains(ConstraintId::new(0)));
        assert!(filter.contains(ConstraintId::new(998)));
        assert!(!filter.contains(ConstraintId::new(7)));
        assert!(!filter.insert(ConstraintId::new(998)));
        assert_eq!(filter.as_slice()[0], ConstraintId::new(998));
        assert_eq!(filter.iter().last(), Some(ConstraintId::new(0)));
    }

    #[test]
    fn test_scope_descriptions() {
        assert_eq!(RelaxationScope::VariableBounds.describe(), "variable bounds");
        assert_eq!(
            RelaxationScope::All.describe(),
            "inequality constraints, equality constraints, and/or variable bounds"
        );
        assert_eq!(RelaxationScope::PHASES[1], RelaxationScope::Inequalities);
    }
}
