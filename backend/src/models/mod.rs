//! Domain models for the lattice walk simulator

pub mod config;
pub mod grid;
pub mod position;
pub mod record;
pub mod walk;

// Re-exports
pub use config::{ConfigError, InclusiveRange};
pub(crate) use config::normalize_selector;
pub use grid::{GridBounds, OccupancyGrid};
pub use position::{Direction, Position};
pub use record::{AggregateRow, WalkSummary, AGGREGATE_CSV_HEADER};
pub use walk::{WalkConfig, WalkKind, WalkResult, DEFAULT_MAX_RESTARTS, DEFAULT_MAX_STEP_RETRIES};
