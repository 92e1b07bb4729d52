use rand::Rng;
use rand::seq::IteratorRandom;

use super::geometry::{Coordinate, GridSize, random_coordinate};
use super::state::Snake;

/// Random draws tried before falling back to an exact free-cell scan
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Pick a cell for a new apple that the snake does not cover.
///
/// Draws uniformly and rejects occupied cells a bounded number of times,
/// then picks uniformly among the remaining free cells. Returns `None` only
/// when the snake covers every cell.
pub fn spawn_apple<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, grid: GridSize) -> Option<Coordinate> {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let candidate = random_coordinate(rng, grid.columns, grid.rows);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    grid.cells().filter(|&cell| !snake.occupies(cell)).choose(rng)
}
