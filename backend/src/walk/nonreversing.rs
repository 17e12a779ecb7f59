//! Nonreversing walk
//!
//! Like the random walk, but a candidate that exactly undoes the previous
//! accepted move is rejected. The first step is unconstrained.

use tracing::warn;

use super::{draw_constrained_step, trajectory_buffer, WalkError, WalkPolicy, TRAJECTORY_RESERVE_CAP};
use crate::models::{Direction, WalkConfig, WalkKind, WalkResult};
use crate::rng::LcgGenerator;

/// Nonreversing walk policy
#[derive(Debug, Clone, Copy, Default)]
pub struct NonreversingWalk;

impl WalkPolicy for NonreversingWalk {
    fn kind(&self) -> WalkKind {
        WalkKind::Nonreversing
    }

    fn walk(&mut self, config: &WalkConfig, rng: &mut LcgGenerator) -> Result<WalkResult, WalkError> {
        let mut current = config.start();
        let mut trajectory = trajectory_buffer(config.steps, TRAJECTORY_RESERVE_CAP);
        trajectory.push(current);
        let mut heading: Option<Direction> = None;
        let mut rejected = 0;

        for step in 0..config.steps {
            let forbidden = heading.map(Direction::reverse);
            match draw_constrained_step(current, &config.grid, forbidden, config.max_step_retries, rng, &mut rejected)? {
                Some((next, direction)) => {
                    current = next;
                    heading = Some(direction);
                    trajectory.push(current);
                }
                None => {
                    warn!(step, steps = config.steps, "nonreversing walk stuck, giving up");
                    return Ok(WalkResult::new(self.kind(), trajectory, false, 0, rejected));
                }
            }
        }

        Ok(WalkResult::new(self.kind(), trajectory, true, 0, rejected))
    }
}
