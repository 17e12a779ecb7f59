//! Orchestrator Engine
//!
//! Drives the walk engine for a single configuration or for whole ranges of
//! seeds and step counts:
//!
//! ```text
//! For each step count N in steps:
//!   For each seed s in seeds:
//!     1. Build a fresh generator (kind, s)
//!     2. Run one walk of N steps
//!     3. Accumulate squared displacement (successful walks only)
//!   Emit (walk kind, N, mean squared displacement)
//! ```
//!
//! Every (seed, N) pair owns its generator and occupancy grid; nothing is
//! shared between walks.
//!
//! # Example
//!
//! ```rust
//! use lattice_walk_core_rs::models::{InclusiveRange, WalkKind};
//! use lattice_walk_core_rs::orchestrator::{AggregationConfig, Aggregator};
//!
//! let config = AggregationConfig {
//!     walk_kind: WalkKind::Nonreversing,
//!     seeds: InclusiveRange::new(1, 10),
//!     steps: InclusiveRange::new(1, 5),
//!     ..AggregationConfig::default()
//! };
//!
//! let report = Aggregator::new(config).unwrap().run().unwrap();
//! assert_eq!(report.rows.len(), 5);
//! assert_eq!(report.rows[0].mean_squared_displacement, Some(1.0));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{
    AggregateRow, ConfigError, GridBounds, InclusiveRange, WalkConfig, WalkKind, WalkResult, WalkSummary,
    DEFAULT_MAX_RESTARTS, DEFAULT_MAX_STEP_RETRIES,
};
use crate::rng::{GeneratorKind, LcgGenerator, RngError};
use crate::validation::ValidationError;
use crate::walk::{run_walk, WalkError};

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("RNG error: {0}")]
    Rng(#[from] RngError),

    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Seeds come from a user-facing spinbox and start at 1
fn validate_seed(seed: u64, generator: GeneratorKind) -> Result<(), ConfigError> {
    let modulus = generator.parameters().modulus();
    if seed == 0 || seed >= modulus {
        return Err(ConfigError::InvalidValue {
            field: "seed",
            reason: format!("{} is not in 1..{}", seed, modulus),
        });
    }
    Ok(())
}

// ============================================================================
// Single walk
// ============================================================================

/// One walk: generator kind, seed and walk parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub generator: GeneratorKind,
    pub seed: u64,
    pub walk: WalkConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::Borland,
            seed: 1337,
            walk: WalkConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_seed(self.seed, self.generator)?;
        self.walk.validate()?;
        Ok(())
    }
}

/// Trajectory plus its summary record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub summary: WalkSummary,
    pub result: WalkResult,
}

/// Run a single walk from a fresh generator
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationOutcome, SimulationError> {
    config.validate()?;

    let mut rng = LcgGenerator::from_kind(config.generator, config.seed)?;
    let result = run_walk(&config.walk, &mut rng)?;
    let summary = WalkSummary::from_result(config.generator, config.seed, config.walk.steps, &result);

    Ok(SimulationOutcome { summary, result })
}

// ============================================================================
// Aggregation
// ============================================================================

/// Seed × step-count sweep for one (generator, walk kind) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub generator: GeneratorKind,
    pub walk_kind: WalkKind,
    pub grid: GridBounds,
    pub seeds: InclusiveRange,
    pub steps: InclusiveRange,
    pub max_restarts: usize,
    pub max_step_retries: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::Borland,
            walk_kind: WalkKind::Random,
            grid: GridBounds::default(),
            seeds: InclusiveRange::new(1, 100),
            steps: InclusiveRange::new(1, 50),
            max_restarts: DEFAULT_MAX_RESTARTS,
            max_step_retries: DEFAULT_MAX_STEP_RETRIES,
        }
    }
}

impl AggregationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.seeds.validate("seeds")?;
        self.steps.validate("steps")?;
        validate_seed(self.seeds.first, self.generator)?;
        validate_seed(self.seeds.last, self.generator)?;
        self.walk_config(0).validate()?;
        Ok(())
    }

    /// Walk parameters for one step count
    pub fn walk_config(&self, steps: usize) -> WalkConfig {
        WalkConfig::new(self.walk_kind, self.grid, steps)
            .with_max_restarts(self.max_restarts)
            .with_max_step_retries(self.max_step_retries)
    }
}

/// All rows of one sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub generator: GeneratorKind,
    pub walk_kind: WalkKind,
    pub rows: Vec<AggregateRow>,
}

impl AggregateReport {
    /// Walks that failed anywhere in the sweep
    pub fn total_failures(&self) -> usize {
        self.rows.iter().map(|r| r.failed_walks).sum()
    }
}

/// Runs a validated [`AggregationConfig`]
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    /// Validate the sweep up front so no fatal condition is found mid-run
    pub fn new(config: AggregationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// One row: every seed at a single step count
    pub fn run_row(&self, step_count: usize) -> Result<AggregateRow, SimulationError> {
        let walk_config = self.config.walk_config(step_count);
        let mut total: u64 = 0;
        let mut successful_walks = 0;
        let mut failed_walks = 0;

        for seed in self.config.seeds.iter() {
            let mut rng = LcgGenerator::from_kind(self.config.generator, seed)?;
            let result = run_walk(&walk_config, &mut rng)?;
            if result.success {
                total += result.squared_displacement;
                successful_walks += 1;
            } else {
                failed_walks += 1;
            }
        }

        let mean_squared_displacement = if successful_walks > 0 {
            Some(total as f64 / successful_walks as f64)
        } else {
            None
        };

        debug!(
            walk = self.config.walk_kind.slug(),
            step_count,
            ?mean_squared_displacement,
            failed_walks,
            "aggregate row"
        );

        Ok(AggregateRow {
            walk_kind: self.config.walk_kind,
            step_count,
            mean_squared_displacement,
            successful_walks,
            failed_walks,
        })
    }

    /// Every row, in increasing step count
    pub fn run(&self) -> Result<AggregateReport, SimulationError> {
        let rows = self
            .config
            .steps
            .iter()
            .map(|n| self.run_row(n as usize))
            .collect::<Result<Vec<_>, _>>()?;

        let report = AggregateReport {
            generator: self.config.generator,
            walk_kind: self.config.walk_kind,
            rows,
        };

        info!(
            generator = self.config.generator.slug(),
            walk = self.config.walk_kind.slug(),
            seeds = self.config.seeds.len(),
            rows = report.rows.len(),
            failures = report.total_failures(),
            "aggregation complete"
        );

        Ok(report)
    }
}

/// Sweep every (generator kind × walk kind) combination with `base`'s ranges
pub fn run_matrix(base: &AggregationConfig) -> Result<Vec<AggregateReport>, SimulationError> {
    let mut reports = Vec::with_capacity(GeneratorKind::ALL.len() * WalkKind::ALL.len());
    for generator in GeneratorKind::ALL {
        for walk_kind in WalkKind::ALL {
            let config = AggregationConfig {
                generator,
                walk_kind,
                ..base.clone()
            };
            reports.push(Aggregator::new(config)?.run()?);
        }
    }
    Ok(reports)
}
