//! Solver configuration types.

/// How a backend serializes the model before handing it to the solver.
///
/// Both modes describe the same problem; `Legacy` is the column-wise path
/// the deletion filter uses for its solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Serialization {
    #[default]
    Standard,
    Legacy,
}

impl Serialization {
    pub fn as_str(self) -> &'static str {
        match self {
            Serialization::Standard => "standard",
            Serialization::Legacy => "legacy",
        }
    }
}

/// Configuration options for solver behavior.
///
/// Passed explicitly to every [`crate::Solve::solve`] call; nothing is read
/// from global state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Verbosity level. `None` uses solver default.
    pub verbosity: Option<u32>,
    /// Enable/disable presolve. `None` uses solver default.
    pub presolve: Option<bool>,
    /// Number of threads to use. `None` uses solver default.
    pub threads: Option<u32>,
    /// Feasibility tolerance. `None` uses solver default.
    pub tolerance: Option<f64>,
    /// Echo solver output to the console. `None` uses solver default.
    pub log_to_console: Option<bool>,
    /// Model serialization mode.
    pub serialization: Serialization,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    /// Set the number of threads.
    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Set the feasibility tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Enable or disable console logging.
    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    pub fn with_serialization(mut self, serialization: Serialization) -> Self {
        self.serialization = serialization;
        self
    }

    /// Whether solver output should be echoed.
    pub fn tee(&self) -> bool {
        self.log_to_console.unwrap_or(false)
    }

    /// Check if this configuration is completely default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_is_empty() {
        let config = SolverConfig::new();
        assert!(config.is_empty());
        assert!(!config.tee());
        assert_eq!(config.serialization, Serialization::Standard);
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SolverConfig::new()
            .with_time_limit(60.0)
            .with_verbosity(1)
            .with_presolve(true)
            .with_threads(4)
            .with_tolerance(1e-6)
            .with_log_to_console(true)
            .with_serialization(Serialization::Legacy);

        assert!(!config.is_empty());
        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.verbosity, Some(1));
        assert_eq!(config.presolve, Some(true));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.tolerance, Some(1e-6));
        assert!(config.tee());
        assert_eq!(config.serialization, Serialization::Legacy);
    }

    #[test]
    fn test_serialization_alone_makes_config_non_default() {
        let config = SolverConfig::new().with_serialization(Serialization::Legacy);
        assert!(!config.is_empty());
        assert_eq!(config.serialization.as_str(), "legacy");
    }

    #[test]
    fn test_scoped_clone_leaves_original_untouched() {
        let base = SolverConfig::new().with_threads(8);
        let scoped = base.clone().with_serialization(Serialization::Legacy);
        assert_eq!(base.serialization, Serialization::Standard);
        assert_eq!(scoped.threads, Some(8));
    }
}
