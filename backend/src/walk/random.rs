//! Unconstrained random walk
//!
//! Each step draws a direction and redraws while the candidate leaves
//! the grid.

use tracing::warn;

use super::{draw_constrained_step, trajectory_buffer, WalkError, WalkPolicy, TRAJECTORY_RESERVE_CAP};
use crate::models::{WalkConfig, WalkKind, WalkResult};
use crate::rng::LcgGenerator;

/// Random walk policy
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalk;

impl WalkPolicy for RandomWalk {
    fn kind(&self) -> WalkKind {
        WalkKind::Random
    }

    fn walk(&mut self, config: &WalkConfig, rng: &mut LcgGenerator) -> Result<WalkResult, WalkError> {
        let mut current = config.start();
        let mut trajectory = trajectory_buffer(config.steps, TRAJECTORY_RESERVE_CAP);
        trajectory.push(current);
        let mut rejected = 0;

        for step in 0..config.steps {
            match draw_constrained_step(current, &config.grid, None, config.max_step_retries, rng, &mut rejected)? {
                Some((next, _)) => {
                    current = next;
                    trajectory.push(current);
                }
                None => {
                    warn!(step, steps = config.steps, "random walk stuck, giving up");
                    return Ok(WalkResult::new(self.kind(), trajectory, false, 0, rejected));
                }
            }
        }

        Ok(WalkResult::new(self.kind(), trajectory, true, 0, rejected))
    }
}
