use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Stable identifier of the cell this coordinate addresses
    pub fn cell_id(&self) -> String {
        format!("__{}_{}", self.x, self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of the board, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        pos.x >= 0 && pos.x < self.columns as i32 && pos.y >= 0 && pos.y < self.rows as i32
    }

    /// Every cell of the board, row by row from the bottom
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.rows as i32)
            .flat_map(move |y| (0..self.columns as i32).map(move |x| Coordinate::new(x, y)))
    }
}

/// Add `delta` to `position` on a torus of the given size.
///
/// Each axis uses Euclidean remainder so stepping left off column 0 lands on
/// the last column, and likewise for rows.
pub fn wrap_add(grid: GridSize, position: Coordinate, delta: (i32, i32)) -> Coordinate {
    Coordinate {
        x: (position.x + delta.0).rem_euclid(grid.columns as i32),
        y: (position.y + delta.1).rem_euclid(grid.rows as i32),
    }
}

/// One step from `position` in `direction`, wrapping at the edges
pub fn step(grid: GridSize, position: Coordinate, direction: Direction) -> Coordinate {
    wrap_add(grid, position, direction.delta())
}

/// Uniformly random cell. No exclusion: callers filter occupied cells.
pub fn random_coordinate<R: Rng + ?Sized>(rng: &mut R, columns: usize, rows: usize) -> Coordinate {
    Coordinate {
        x: rng.gen_range(0..columns) as i32,
        y: rng.gen_range(0..rows) as i32,
    }
}
