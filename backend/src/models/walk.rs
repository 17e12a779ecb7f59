//! Walk configuration and results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::config::{normalize_selector, ConfigError};
use crate::models::grid::GridBounds;
use crate::models::position::Position;

/// Default self-avoiding restart budget
pub const DEFAULT_MAX_RESTARTS: usize = 10_000;

/// Default cap on consecutive rejected candidates within one step
pub const DEFAULT_MAX_STEP_RETRIES: usize = 10_000;

/// Movement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalkKind {
    /// Any in-bounds neighbour
    Random,
    /// Any in-bounds neighbour except straight back
    Nonreversing,
    /// Never revisits a cell; restarts the whole walk on collision
    SelfAvoiding,
}

impl WalkKind {
    pub const ALL: [WalkKind; 3] = [WalkKind::Random, WalkKind::Nonreversing, WalkKind::SelfAvoiding];

    /// Label used in reports and the CSV "Walk type" column
    pub fn label(&self) -> &'static str {
        match self {
            WalkKind::Random => "Random walk",
            WalkKind::Nonreversing => "Nonreversing walk",
            WalkKind::SelfAvoiding => "Self-avoiding walk",
        }
    }

    /// Short identifier used in file names
    pub fn slug(&self) -> &'static str {
        match self {
            WalkKind::Random => "random",
            WalkKind::Nonreversing => "nonreversing",
            WalkKind::SelfAvoiding => "self_avoiding",
        }
    }
}

impl fmt::Display for WalkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WalkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_selector(s).as_str() {
            "random" | "randomwalk" => Ok(WalkKind::Random),
            "nonreversing" | "nonreversingwalk" => Ok(WalkKind::Nonreversing),
            "selfavoiding" | "selfavoidingwalk" | "saw" => Ok(WalkKind::SelfAvoiding),
            _ => Err(ConfigError::UnknownWalkKind(s.to_string())),
        }
    }
}

/// Parameters of a single walk
///
/// The start cell is always `grid.start()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub grid: GridBounds,

    /// Number of accepted steps N (trajectory length is N + 1)
    pub steps: usize,

    pub kind: WalkKind,

    /// Self-avoiding attempts allowed after the first one
    pub max_restarts: usize,

    /// Random/Nonreversing: consecutive rejected candidates allowed per step
    pub max_step_retries: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            grid: GridBounds::default(),
            steps: 10,
            kind: WalkKind::Random,
            max_restarts: DEFAULT_MAX_RESTARTS,
            max_step_retries: DEFAULT_MAX_STEP_RETRIES,
        }
    }
}

impl WalkConfig {
    pub fn new(kind: WalkKind, grid: GridBounds, steps: usize) -> Self {
        Self {
            grid,
            steps,
            kind,
            ..Self::default()
        }
    }

    pub fn with_max_restarts(mut self, max_restarts: usize) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    pub fn with_max_step_retries(mut self, max_step_retries: usize) -> Self {
        self.max_step_retries = max_step_retries;
        self
    }

    pub fn start(&self) -> Position {
        self.grid.start()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.max_step_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_step_retries",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of one walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkResult {
    pub kind: WalkKind,

    /// Visited cells, starting cell first
    ///
    /// On success this holds N + 1 positions. On failure it holds the
    /// positions accepted by the last attempt.
    pub trajectory: Vec<Position>,

    /// False when the restart budget or the step-retry cap ran out
    pub success: bool,

    /// Squared Euclidean distance from the start to the last position
    pub squared_displacement: u64,

    /// Self-avoiding attempts beyond the first
    pub restarts: usize,

    /// Candidates rejected (out of bounds or reversing) across the walk
    pub rejected_candidates: usize,
}

impl WalkResult {
    pub(crate) fn new(
        kind: WalkKind,
        trajectory: Vec<Position>,
        success: bool,
        restarts: usize,
        rejected_candidates: usize,
    ) -> Self {
        let squared_displacement = match (trajectory.first(), trajectory.last()) {
            (Some(first), Some(last)) => first.squared_distance(*last),
            _ => 0,
        };
        Self {
            kind,
            trajectory,
            success,
            squared_displacement,
            restarts,
            rejected_candidates,
        }
    }

    /// Number of accepted steps
    pub fn steps_taken(&self) -> usize {
        self.trajectory.len().saturating_sub(1)
    }

    pub fn final_position(&self) -> Option<Position> {
        self.trajectory.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_kind_from_str() {
        assert_eq!("RANDOM".parse::<WalkKind>().unwrap(), WalkKind::Random);
        assert_eq!("non-reversing".parse::<WalkKind>().unwrap(), WalkKind::Nonreversing);
        assert_eq!("SELF_AVOIDING".parse::<WalkKind>().unwrap(), WalkKind::SelfAvoiding);
        assert_eq!("saw".parse::<WalkKind>().unwrap(), WalkKind::SelfAvoiding);
        assert_eq!(
            "spiral".parse::<WalkKind>(),
            Err(ConfigError::UnknownWalkKind("spiral".to_string()))
        );
    }

    #[test]
    fn test_walk_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&WalkKind::SelfAvoiding).unwrap();
        assert_eq!(json, "\"SELF_AVOIDING\"");
    }

    #[test]
    fn test_default_config() {
        let config = WalkConfig::default();
        assert_eq!(config.start(), Position::new(40, 20));
        assert_eq!(config.max_restarts, DEFAULT_MAX_RESTARTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: WalkConfig = serde_json::from_str(r#"{"steps": 25, "kind": "NONREVERSING"}"#).unwrap();
        assert_eq!(config.steps, 25);
        assert_eq!(config.kind, WalkKind::Nonreversing);
        assert_eq!(config.grid, GridBounds::default());
    }

    #[test]
    fn test_zero_step_retries_rejected() {
        let config = WalkConfig::default().with_max_step_retries(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "max_step_retries", .. })
        ));
    }

    #[test]
    fn test_result_displacement() {
        let result = WalkResult::new(
            WalkKind::Random,
            vec![Position::new(5, 5), Position::new(5, 6), Position::new(4, 7)],
            true,
            0,
            0,
        );
        assert_eq!(result.squared_displacement, 5);
        assert_eq!(result.steps_taken(), 2);
        assert_eq!(result.final_position(), Some(Position::new(4, 7)));
    }
}
