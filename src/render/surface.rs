//! Output collaborators driven by the game loop
//!
//! The loop never draws directly. It pushes cell changes into a
//! [`GridSurface`], score changes into a [`ScoreDisplay`] and eat events into
//! an [`AudioCue`]. The terminal implementations here buffer that state for
//! the ratatui renderer; headless runs use the same buffers without drawing.

use std::io::{Write, stderr};

use tracing::trace;

use crate::game::{CellKind, Coordinate, GridSize};

/// Addressable set of grid cells
pub trait GridSurface {
    /// Rebuild the cell set, every cell empty
    fn reset_grid(&mut self, rows: usize, columns: usize);

    fn set_cell_occupied(&mut self, coord: Coordinate, kind: CellKind, occupied: bool);
}

pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}

/// Fire-and-forget sound played when an apple is eaten
pub trait AudioCue {
    fn play_eat_sound(&mut self);
}

/// What a single cell currently shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    pub snake: bool,
    pub apple: bool,
}

/// In-memory grid the terminal renderer draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalGrid {
    size: GridSize,
    cells: Vec<CellState>,
}

impl TerminalGrid {
    pub fn new() -> Self {
        Self {
            size: GridSize::new(0, 0),
            cells: Vec::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        if self.size.contains(coord) {
            Some(coord.y as usize * self.size.columns + coord.x as usize)
        } else {
            None
        }
    }

    /// State of a cell; cells outside the grid read as empty
    pub fn cell(&self, coord: Coordinate) -> CellState {
        self.index(coord)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    /// Number of cells currently showing `kind`
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .filter(|cell| match kind {
                CellKind::Snake => cell.snake,
                CellKind::Apple => cell.apple,
            })
            .count()
    }
}

impl Default for TerminalGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSurface for TerminalGrid {
    fn reset_grid(&mut self, rows: usize, columns: usize) {
        self.size = GridSize::new(columns, rows);
        self.cells.clear();
        self.cells.resize(rows * columns, CellState::default());
    }

    fn set_cell_occupied(&mut self, coord: Coordinate, kind: CellKind, occupied: bool) {
        let Some(i) = self.index(coord) else {
            trace!(cell = %coord.cell_id(), "ignoring update outside the grid");
            return;
        };
        let cell = &mut self.cells[i];
        match kind {
            CellKind::Snake => cell.snake = occupied,
            CellKind::Apple => cell.apple = occupied,
        }
    }
}

/// Last score pushed by the game loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
}

impl ScoreDisplay for ScoreBoard {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play_eat_sound(&mut self) {
        let mut out = stderr();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

/// Cue that does nothing, for muted and headless runs
#[derive(Debug, Default)]
pub struct SilentCue {
    pub played: u32,
}

impl AudioCue for SilentCue {
    fn play_eat_sound(&mut self) {
        self.played += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_builds_empty_cells() {
        let mut grid = TerminalGrid::new();
        grid.reset_grid(3, 4);

        assert_eq!(grid.size(), GridSize::new(4, 3));
        assert_eq!(grid.cells.len(), 12);
        assert_eq!(grid.count(CellKind::Snake), 0);
        assert_eq!(grid.count(CellKind::Apple), 0);
    }

    #[test]
    fn test_reset_twice_matches_once() {
        let mut once = TerminalGrid::new();
        once.reset_grid(5, 5);

        let mut twice = TerminalGrid::new();
        twice.reset_grid(5, 5);
        twice.set_cell_occupied(Coordinate::new(1, 1), CellKind::Snake, true);
        twice.reset_grid(5, 5);
        twice.reset_grid(5, 5);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut grid = TerminalGrid::new();
        grid.reset_grid(4, 4);
        let pos = Coordinate::new(2, 3);

        grid.set_cell_occupied(pos, CellKind::Snake, true);
        grid.set_cell_occupied(pos, CellKind::Apple, true);
        assert_eq!(grid.cell(pos), CellState { snake: true, apple: true });

        grid.set_cell_occupied(pos, CellKind::Apple, false);
        assert_eq!(grid.cell(pos), CellState { snake: true, apple: false });
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut grid = TerminalGrid::new();
        grid.reset_grid(2, 2);
        grid.set_cell_occupied(Coordinate::new(5, 0), CellKind::Snake, true);
        grid.set_cell_occupied(Coordinate::new(-1, 0), CellKind::Snake, true);

        assert_eq!(grid.count(CellKind::Snake), 0);
        assert_eq!(grid.cell(Coordinate::new(5, 0)), CellState::default());
    }

    #[test]
    fn test_score_board() {
        let mut board = ScoreBoard::default();
        board.show_score(4);
        assert_eq!(board.score, 4);
    }
}
