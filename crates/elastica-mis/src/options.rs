//! Caller-facing knobs for a diagnosis run.

use elastica_solver::SolverConfig;

/// Violations at or below this amount count as satisfied.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Options for [`crate::compute_infeasibility_explanation`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOptions {
    /// Feasibility tolerance; a slack must exceed it to count as a violation.
    pub tolerance: f64,
    /// Echo every intermediate solve.
    pub tee: bool,
    /// Base configuration for every solve.
    pub solver_config: SolverConfig,
}

impl Default for DiagnosisOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            tee: false,
            solver_config: SolverConfig::default(),
        }
    }
}

impl DiagnosisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_tee(mut self, tee: bool) -> Self {
        self.tee = tee;
        self
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    /// Configuration handed to the solver, with `tee` applied.
    pub(crate) fn effective_solver_config(&self) -> SolverConfig {
        self.solver_config.clone().with_log_to_console(self.tee)
    }
}
