//! HiGHS backend for Elastica.
//!
//! Linear and mixed-integer-linear models are extracted from an
//! `elastica_core::Model` into a sparse [`LinearProgram`] and handed to HiGHS
//! row-wise (`Serialization::Standard`) or column-wise
//! (`Serialization::Legacy`).

pub mod ffi;
pub mod program;
pub mod solver;
mod status;

pub use ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, Layout, ObjectiveSense, highs_version};
pub use program::{ColumnSpec, LinearProgram, RowSpec};
pub use solver::HighsSolver;

use elastica_solver::SolverRegistry;

/// Register the HiGHS backend under `highs`.
pub fn register(registry: &mut SolverRegistry) {
    registry.register("highs", || Box::new(HighsSolver::new()));
}

/// Registry holding every backend this crate provides, HiGHS as default.
pub fn default_registry() -> SolverRegistry {
    let mut registry = SolverRegistry::new();
    register(&mut registry);
    registry
}
