//! Instrumentation helpers for Elastica.
//!
//! Solves and diagnosis stages attach resident memory readings to their
//! structured log events.

pub mod memory;

pub use memory::{MemoryError, MemoryProbe, MemorySnapshot};
