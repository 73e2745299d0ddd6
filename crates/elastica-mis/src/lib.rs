//! Minimal Intractable System (MIS) diagnosis for infeasible models.
//!
//! [`compute_infeasibility_explanation`] works on an elastic copy of the
//! caller's model. It reports which bounds and constraints had to be relaxed
//! to reach a feasible point and, when possible, an irreducible set of
//! constraints and bounds that cannot hold together.
//!
//! ```no_run
//! use elastica_core::{Bounds, Model, Variable};
//! use elastica_highs::HighsSolver;
//! use elastica_mis::{DiagnosisOptions, compute_infeasibility_explanation};
//!
//! let mut model = Model::named("tank");
//! model.add_variable("level", Variable::continuous(Bounds::new(5.0, 2.0)))?;
//!
//! let mut solver = HighsSolver::new();
//! let options = DiagnosisOptions::new();
//! let report = compute_infeasibility_explanation(&mut model, &mut solver, &options)?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod crossref;
mod deletion;
mod diagnose;
mod error;
mod options;
mod outcome;
mod relax;
mod report;

pub use crossref::{ValueCache, VariableMap};
pub use deletion::{DeletionOutcome, run_deletion_filter};
pub use diagnose::compute_infeasibility_explanation;
pub use error::DiagnosisError;
pub use options::{DEFAULT_TOLERANCE, DiagnosisOptions};
pub use relax::{ElasticFilter, Relaxation, RelaxationRound, RelaxationScope, Violation, relax};
pub use report::{InfeasibilityReport, Outcome, RelaxedItem, RelaxedSet, ReportItem};
