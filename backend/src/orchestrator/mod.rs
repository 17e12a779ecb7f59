//! Orchestrator - single walks and seed × step-count sweeps
//!
//! See `engine.rs` for the drivers and `manifest.rs` for export manifests.

pub mod engine;
pub mod manifest;

// Re-export main types for convenience
pub use engine::{
    run_matrix, run_simulation, AggregateReport, AggregationConfig, Aggregator, SimulationConfig,
    SimulationError, SimulationOutcome,
};
pub use manifest::{compute_config_hash, RunManifest};
