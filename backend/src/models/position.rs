//! Lattice positions and the four cardinal moves
//!
//! Direction indices are fixed:
//!
//! | index | direction | delta     |
//! |-------|-----------|-----------|
//! | 0     | North     | (0, +1)   |
//! | 1     | East      | (+1, 0)   |
//! | 2     | South     | (0, -1)   |
//! | 3     | West      | (-1, 0)   |
//!
//! "North" is simply +y; renderers that flip the y axis draw it downwards.

use serde::{Deserialize, Serialize};

use crate::walk::WalkError;

/// A lattice cell `(x, y)`
///
/// Coordinates are signed so that a candidate one step outside the grid
/// can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Squared Euclidean distance to `other`
    pub fn squared_distance(self, other: Position) -> u64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy) as u64
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// One of the four cardinal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Map an index in `0..=3` to a direction
    ///
    /// # Errors
    /// `WalkError::InvalidDirection` for any other index
    pub fn from_index(index: i64) -> Result<Self, WalkError> {
        match index {
            0 => Ok(Direction::North),
            1 => Ok(Direction::East),
            2 => Ok(Direction::South),
            3 => Ok(Direction::West),
            other => Err(WalkError::InvalidDirection(other)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Unit move `(dx, dy)`
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// The direction whose delta cancels this one
    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Turn relative to this heading: -1 = left, 0 = straight, +1 = right
    ///
    /// Any offset is reduced modulo 4, so the result is always valid.
    pub fn turn(self, offset: i64) -> Self {
        match (self.index() as i64 + offset).rem_euclid(4) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }
}
