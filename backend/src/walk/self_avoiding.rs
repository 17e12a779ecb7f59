//! Self-avoiding walk with whole-walk restarts
//!
//! The first move is drawn over all four directions. Every later move
//! turns left, goes straight or turns right relative to the current
//! heading: `(previous + floor(draw(-1, 2))) mod 4`. A candidate that
//! leaves the grid or lands on a visited cell aborts the attempt; the
//! walk then starts over from the start cell with the same generator
//! (not reseeded). After `max_restarts` failed restarts the walk is
//! reported as unsuccessful.

use tracing::{debug, warn};

use super::{draw_direction, trajectory_buffer, WalkError, WalkPolicy};
use crate::models::{Direction, GridBounds, OccupancyGrid, Position, WalkConfig, WalkKind, WalkResult};
use crate::rng::LcgGenerator;

/// Self-avoiding walk policy
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfAvoidingWalk;

/// Why an attempt stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Blocked {
    Wall,
    Visited,
}

impl SelfAvoidingWalk {
    /// Run one attempt from the start cell
    ///
    /// `trajectory` and `occupancy` must already hold only the start cell.
    fn attempt(
        &self,
        steps: usize,
        grid: &GridBounds,
        rng: &mut LcgGenerator,
        occupancy: &mut OccupancyGrid,
        trajectory: &mut Vec<Position>,
    ) -> Result<Option<(usize, Blocked)>, WalkError> {
        let mut current = grid.start();
        let mut heading: Option<Direction> = None;

        for step in 0..steps {
            let direction = match heading {
                None => draw_direction(rng)?,
                Some(previous) => previous.turn(rng.draw_int(-1, 2)?),
            };
            let candidate = current.step(direction);

            if !grid.contains(candidate) {
                return Ok(Some((step, Blocked::Wall)));
            }
            if occupancy.is_occupied(candidate)? {
                return Ok(Some((step, Blocked::Visited)));
            }

            occupancy.mark(candidate)?;
            trajectory.push(candidate);
            current = candidate;
            heading = Some(direction);
        }

        Ok(None)
    }
}

impl WalkPolicy for SelfAvoidingWalk {
    fn kind(&self) -> WalkKind {
        WalkKind::SelfAvoiding
    }

    fn walk(&mut self, config: &WalkConfig, rng: &mut LcgGenerator) -> Result<WalkResult, WalkError> {
        let start = config.start();
        let mut occupancy = OccupancyGrid::new(config.grid);
        let mut trajectory = trajectory_buffer(config.steps, config.grid.cell_count());

        for attempt in 0..=config.max_restarts {
            occupancy.clear();
            occupancy.mark(start)?;
            trajectory.clear();
            trajectory.push(start);

            match self.attempt(config.steps, &config.grid, rng, &mut occupancy, &mut trajectory)? {
                None => {
                    return Ok(WalkResult::new(self.kind(), trajectory, true, attempt, 0));
                }
                Some((step, reason)) => {
                    debug!(attempt, step, ?reason, "self-avoiding attempt blocked, restarting");
                }
            }
        }

        warn!(
            steps = config.steps,
            max_restarts = config.max_restarts,
            "self-avoiding walk exhausted its restart budget"
        );
        Ok(WalkResult::new(self.kind(), trajectory, false, config.max_restarts, 0))
    }
}
