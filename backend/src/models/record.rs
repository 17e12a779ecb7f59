//! Records emitted for external consumers (renderers, exporters)
//!
//! These are plain data. Formatting and writing them is the caller's job.

use serde::{Deserialize, Serialize};

use crate::models::walk::{WalkKind, WalkResult};
use crate::rng::GeneratorKind;

/// Header of the tabular aggregate export
pub const AGGREGATE_CSV_HEADER: &str = "Walk type, Number of steps, Squared euclidian distance";

/// Per-walk summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkSummary {
    pub rng_kind: GeneratorKind,
    pub walk_kind: WalkKind,
    pub seed: u64,
    pub step_count: usize,
    pub squared_displacement: u64,
    pub success: bool,
    pub restarts: usize,
}

impl WalkSummary {
    pub fn from_result(rng_kind: GeneratorKind, seed: u64, step_count: usize, result: &WalkResult) -> Self {
        Self {
            rng_kind,
            walk_kind: result.kind,
            seed,
            step_count,
            squared_displacement: result.squared_displacement,
            success: result.success,
            restarts: result.restarts,
        }
    }
}

/// Mean squared displacement for one step count over a seed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub walk_kind: WalkKind,
    pub step_count: usize,

    /// Mean over successful walks; `None` when no walk succeeded
    pub mean_squared_displacement: Option<f64>,

    pub successful_walks: usize,
    pub failed_walks: usize,
}

impl AggregateRow {
    /// One CSV line matching [`AGGREGATE_CSV_HEADER`]
    ///
    /// Means keep their decimal point (`1.0`, not `1`). A missing mean is
    /// written as an empty field.
    pub fn to_csv_line(&self) -> String {
        let mean = self
            .mean_squared_displacement
            .map(|m| format!("{:?}", m))
            .unwrap_or_default();
        format!("{}, {}, {}", self.walk_kind.label(), self.step_count, mean)
    }
}
