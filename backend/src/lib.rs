//! Lattice Walk Core - Rust Engine
//!
//! Random walks on a bounded square lattice, driven by bit-windowed linear
//! congruential generators, with deterministic execution.
//!
//! # Architecture
//!
//! - **rng**: LCG generators (Borland, Numerical Recipes) and real-interval draws
//! - **models**: Domain types (Position, GridBounds, WalkConfig, WalkResult)
//! - **walk**: Walk policies (random, nonreversing, self-avoiding)
//! - **validation**: Two-dice chi-squared test and range checks
//! - **orchestrator**: Single walks and mean-squared-displacement sweeps
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded LCG)
//! 2. Every trajectory point lies inside the grid
//! 3. FFI boundary is minimal and safe

// Module declarations
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod validation;
pub mod walk;

// Re-exports for convenience
pub use models::{
    AggregateRow, ConfigError, Direction, GridBounds, InclusiveRange, Position, WalkConfig, WalkKind,
    WalkResult, WalkSummary,
};
pub use orchestrator::{
    run_matrix, run_simulation, AggregateReport, AggregationConfig, Aggregator, RunManifest,
    SimulationConfig, SimulationError, SimulationOutcome,
};
pub use rng::{GeneratorKind, LcgGenerator, LcgParameters, RngError};
pub use validation::{run_dice_batch, run_dice_test, DiceTestConfig, ValidationError, ValidationReport};
pub use walk::{create_policy, run_walk, WalkError, WalkPolicy};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn lattice_walk_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::walk::run_walk, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::walk::aggregate, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::walk::dice_test, m)?)?;
    Ok(())
}
