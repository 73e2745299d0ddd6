//! Shared solver abstractions for Elastica.
//!
//! Backends (like `elastica-highs`) implement [`Solve`] against an
//! [`elastica_core::Model`]; the diagnosis engine only ever talks to the trait.
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for solver behavior
//! - [`Serialization`]: How a backend hands the model to the solver
//! - [`SolverStatus`]: Common status values across solvers
//! - [`SolverError`]: Error types for solver operations
//! - [`Solution`]: Solver-agnostic solve result
//! - [`Solve`]: Trait for solver implementations
//! - [`SolverRegistry`]: Named solver constructors

mod config;
mod error;
mod registry;
mod solution;
mod status;
mod traits;

pub use config::{Serialization, SolverConfig};
pub use error::SolverError;
pub use registry::{SolverFactory, SolverRegistry};
pub use solution::Solution;
pub use status::SolverStatus;
pub use traits::Solve;
