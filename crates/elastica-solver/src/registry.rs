//! Named solver constructors.

use std::collections::BTreeMap;

use crate::{Solve, SolverError};

/// Constructor for a boxed solver.
pub type SolverFactory = Box<dyn Fn() -> Box<dyn Solve> + Send + Sync>;

/// Explicit name to constructor map with an optional default entry.
#[derive(Default)]
pub struct SolverRegistry {
    factories: BTreeMap<String, SolverFactory>,
    default: Option<String>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `name`. The first registration becomes
    /// the default.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Solve> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        tracing::debug!(
            component = "solver_registry",
            operation = "register",
            status = "success",
            solver = %name,
            "Registered solver"
        );
        self.factories.insert(name, Box::new(factory));
    }

    pub fn set_default(&mut self, name: &str) -> Result<(), SolverError> {
        if !self.factories.contains_key(name) {
            return Err(SolverError::SolverNotAvailable(name.to_string()));
        }
        self.default = Some(name.to_string());
        Ok(())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    /// Build the named solver, or the default one for `None`.
    pub fn create(&self, name: Option<&str>) -> Result<Box<dyn Solve>, SolverError> {
        let name = match name {
            Some(name) => name,
            None => self
                .default
                .as_deref()
                .ok_or_else(|| SolverError::SolverNotAvailable("<default>".to_string()))?,
        };
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SolverError::SolverNotAvailable(name.to_string()))?;
        Ok(factory())
    }
}

impl std::fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.factories.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Solution, SolverConfig, SolverStatus};
    use elastica_core::Model;

    struct Named(&'static str);

    impl Solve for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn solve(
            &mut self,
            _model: &Model,
            _config: &SolverConfig,
        ) -> Result<Solution, SolverError> {
            Ok(Solution::with_status(SolverStatus::Unknown))
        }
    }

    fn registry() -> SolverRegistry {
        let mut registry = SolverRegistry::new();
        registry.register("first", || Box::new(Named("first")));
        registry.register("second", || Box::new(Named("second")));
        registry
    }

    #[test]
    fn test_first_registration_is_default() {
        let registry = registry();
        assert_eq!(registry.default_name(), Some("first"));
        assert_eq!(registry.create(None).unwrap().name(), "first");
        assert_eq!(registry.create(Some("second")).unwrap().name(), "second");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_name_is_not_available() {
        let registry = registry();
        let err = registry.create(Some("ipopt")).err().unwrap();
        assert_eq!(err, SolverError::SolverNotAvailable("ipopt".to_string()));
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = SolverRegistry::new();
        assert!(registry.create(None).is_err());
    }

    #[test]
    fn test_set_default() {
        let mut registry = registry();
        registry.set_default("second").unwrap();
        assert_eq!(registry.create(None).unwrap().name(), "second");
        assert!(registry.set_default("missing").is_err());
    }
}
