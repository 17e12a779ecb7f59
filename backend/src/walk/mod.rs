//! Walk Engine
//!
//! Runs lattice walks driven by an [`LcgGenerator`].
//!
//! # Policies
//!
//! All movement policies implement the `WalkPolicy` trait:
//! 1. **Random**: redraw until the candidate cell is inside the grid
//! 2. **Nonreversing**: as Random, and never straight back
//! 3. **SelfAvoiding**: turn left/straight/right; any collision or wall
//!    aborts the attempt and the whole walk restarts
//!
//! Every walk starts at `(floor(W/2), floor(H/2))` and ends after N
//! accepted steps or when its retry budget runs out.
//!
//! # Example
//!
//! ```rust
//! use lattice_walk_core_rs::models::{GridBounds, WalkConfig, WalkKind};
//! use lattice_walk_core_rs::rng::{GeneratorKind, LcgGenerator};
//! use lattice_walk_core_rs::walk::run_walk;
//!
//! let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1337).unwrap();
//! let config = WalkConfig::new(WalkKind::Nonreversing, GridBounds::new(10, 10).unwrap(), 10);
//! let result = run_walk(&config, &mut rng).unwrap();
//! assert_eq!(result.trajectory.len(), 11);
//! ```

mod nonreversing;
mod random;
mod self_avoiding;

pub use nonreversing::NonreversingWalk;
pub use random::RandomWalk;
pub use self_avoiding::SelfAvoidingWalk;

use thiserror::Error;
use tracing::debug;

use crate::models::{ConfigError, Direction, GridBounds, Position, WalkConfig, WalkKind, WalkResult};
use crate::rng::{LcgGenerator, RngError};

/// Internal faults raised while walking
///
/// Collisions and exhausted budgets are not errors; they are reported
/// through [`WalkResult::success`].
#[derive(Debug, Error, PartialEq)]
pub enum WalkError {
    #[error("Direction index {0} is outside 0..=3")]
    InvalidDirection(i64),

    #[error("Position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Invalid walk configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("RNG error: {0}")]
    Rng(#[from] RngError),
}

/// A movement policy
pub trait WalkPolicy {
    fn kind(&self) -> WalkKind;

    /// Run one walk of `config.steps` steps, advancing `rng` in place
    fn walk(&mut self, config: &WalkConfig, rng: &mut LcgGenerator) -> Result<WalkResult, WalkError>;
}

/// Build the policy for `kind`
pub fn create_policy(kind: WalkKind) -> Box<dyn WalkPolicy> {
    match kind {
        WalkKind::Random => Box::new(RandomWalk),
        WalkKind::Nonreversing => Box::new(NonreversingWalk),
        WalkKind::SelfAvoiding => Box::new(SelfAvoidingWalk),
    }
}

/// Validate `config` and run one walk of its kind
pub fn run_walk(config: &WalkConfig, rng: &mut LcgGenerator) -> Result<WalkResult, WalkError> {
    config.validate()?;
    create_policy(config.kind).walk(config, rng)
}

/// Largest trajectory reserved up front by the bounded-retry walks
pub(crate) const TRAJECTORY_RESERVE_CAP: usize = 1 << 20;

/// Empty trajectory with room for `steps + 1` positions, at most `limit`
///
/// Walks can stop long before `steps`, so a huge step count must not
/// turn into a huge (or overflowing) allocation.
pub(crate) fn trajectory_buffer(steps: usize, limit: usize) -> Vec<Position> {
    Vec::with_capacity(steps.saturating_add(1).min(limit))
}

/// Draw a direction uniformly over the four moves
pub(crate) fn draw_direction(rng: &mut LcgGenerator) -> Result<Direction, WalkError> {
    Direction::from_index(rng.draw_int(0, 4)?)
}

/// Redraw until a candidate is in bounds and not `forbidden`
///
/// Returns `None` after `max_retries` consecutive rejections. Every
/// rejection is added to `rejected`.
pub(crate) fn draw_constrained_step(
    current: Position,
    grid: &GridBounds,
    forbidden: Option<Direction>,
    max_retries: usize,
    rng: &mut LcgGenerator,
    rejected: &mut usize,
) -> Result<Option<(Position, Direction)>, WalkError> {
    let mut misses = 0;
    loop {
        let direction = draw_direction(rng)?;
        let candidate = current.step(direction);
        if grid.contains(candidate) && Some(direction) != forbidden {
            return Ok(Some((candidate, direction)));
        }

        *rejected += 1;
        misses += 1;
        if misses >= max_retries {
            debug!(
                x = current.x,
                y = current.y,
                misses,
                "step retry cap reached"
            );
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GeneratorKind;

    #[test]
    fn test_create_policy_kinds() {
        for kind in WalkKind::ALL {
            assert_eq!(create_policy(kind).kind(), kind);
        }
    }

    #[test]
    fn test_run_walk_rejects_empty_grid() {
        let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1).unwrap();
        let mut config = WalkConfig::default();
        config.grid.width = 0;
        let err = run_walk(&config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            WalkError::Config(ConfigError::InvalidGrid { width: 0, height: 40 })
        );
        assert_eq!(rng.seed(), 1, "validation must happen before any draw");
    }

    #[test]
    fn test_first_borland_direction() {
        let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 1337).unwrap();
        assert_eq!(draw_direction(&mut rng).unwrap(), Direction::North);
    }

    #[test]
    fn test_trajectory_buffer_is_capped() {
        assert!(trajectory_buffer(10, TRAJECTORY_RESERVE_CAP).capacity() >= 11);
        let huge = trajectory_buffer(usize::MAX, 64);
        assert!(huge.is_empty());
        assert!(huge.capacity() >= 64 && huge.capacity() < TRAJECTORY_RESERVE_CAP);
    }

    #[test]
    fn test_constrained_step_gives_up() {
        let grid = GridBounds::new(1, 1).unwrap();
        let mut rng = LcgGenerator::from_kind(GeneratorKind::Borland, 3).unwrap();
        let mut rejected = 0;
        let step = draw_constrained_step(Position::new(0, 0), &grid, None, 25, &mut rng, &mut rejected).unwrap();
        assert_eq!(step, None);
        assert_eq!(rejected, 25);
    }
}
