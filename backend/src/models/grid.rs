//! Grid bounds and the self-avoiding occupancy grid
//!
//! The occupancy grid is a single contiguous buffer indexed by
//! `y * width + x`. Every access is bounds-checked first, so a lookup
//! outside the grid is an error rather than a wrapped index.

use serde::{Deserialize, Serialize};

use crate::models::position::Position;
use crate::models::ConfigError;
use crate::walk::WalkError;

/// Rectangular lattice `[0, width) × [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: usize,
    pub height: usize,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
        }
    }
}

impl GridBounds {
    /// Create bounds, rejecting zero dimensions
    ///
    /// # Example
    /// ```
    /// use lattice_walk_core_rs::models::{GridBounds, Position};
    ///
    /// let grid = GridBounds::new(10, 10).unwrap();
    /// assert_eq!(grid.start(), Position::new(5, 5));
    /// assert!(GridBounds::new(0, 10).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Starting cell `(floor(W/2), floor(H/2))`
    pub fn start(&self) -> Position {
        Position::new((self.width / 2) as i64, (self.height / 2) as i64)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Linear buffer index of `pos`
    ///
    /// # Errors
    /// `WalkError::OutOfBounds` when `pos` lies outside the grid
    pub fn index_of(&self, pos: Position) -> Result<usize, WalkError> {
        if !self.contains(pos) {
            return Err(WalkError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y as usize * self.width + pos.x as usize)
    }
}

/// Visited-cell map owned by one self-avoiding attempt
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    bounds: GridBounds,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: vec![false; bounds.cell_count()],
        }
    }

    /// Forget every visited cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn is_occupied(&self, pos: Position) -> Result<bool, WalkError> {
        let idx = self.bounds.index_of(pos)?;
        Ok(self.cells[idx])
    }

    pub fn mark(&mut self, pos: Position) -> Result<(), WalkError> {
        let idx = self.bounds.index_of(pos)?;
        self.cells[idx] = true;
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_floor_of_half() {
        assert_eq!(GridBounds::new(80, 40).unwrap().start(), Position::new(40, 20));
        assert_eq!(GridBounds::new(3, 5).unwrap().start(), Position::new(1, 2));
        assert_eq!(GridBounds::new(1, 1).unwrap().start(), Position::new(0, 0));
    }

    #[test]
    fn test_contains_edges() {
        let grid = GridBounds::new(4, 3).unwrap();
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(3, 2)));
        assert!(!grid.contains(Position::new(4, 0)));
        assert!(!grid.contains(Position::new(0, 3)));
        assert!(!grid.contains(Position::new(-1, 1)));
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = GridBounds::new(4, 3).unwrap();
        assert_eq!(grid.index_of(Position::new(1, 2)).unwrap(), 9);
    }

    #[test]
    fn test_occupancy_rejects_out_of_bounds() {
        let mut occ = OccupancyGrid::new(GridBounds::new(2, 2).unwrap());
        assert!(matches!(
            occ.is_occupied(Position::new(2, 0)),
            Err(WalkError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(occ.mark(Position::new(0, -1)).is_err());
    }

    #[test]
    fn test_occupancy_mark_and_clear() {
        let mut occ = OccupancyGrid::new(GridBounds::new(3, 3).unwrap());
        occ.mark(Position::new(1, 1)).unwrap();
        assert!(occ.is_occupied(Position::new(1, 1)).unwrap());
        assert!(!occ.is_occupied(Position::new(1, 2)).unwrap());
        assert_eq!(occ.occupied_count(), 1);
        occ.clear();
        assert_eq!(occ.occupied_count(), 0);
    }
}
