use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::direction::Direction;
use super::geometry::{Coordinate, GridSize};

/// What a tick does after a self-collision has reset the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionReset {
    /// Restart with exactly the default body; the tick ends there.
    #[default]
    Clean,
    /// Append the computed head to the reset body and finish the tick
    /// (apple check, tail shift) against it.
    Compatible,
}

/// Largest board, in cells, a game may be played on
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Reasons a configuration cannot start a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row (got {columns}x{rows})")]
    EmptyGrid { columns: usize, rows: usize },
    #[error("grid of {columns}x{rows} exceeds {max} cells", max = MAX_GRID_CELLS)]
    GridTooLarge { columns: usize, rows: usize },
    #[error("tick delay must be greater than zero")]
    ZeroDelay,
    #[error("default snake must have at least one cell")]
    EmptySnake,
    #[error("default snake cell {0} lies outside the grid")]
    SnakeOutOfBounds(Coordinate),
    #[error("default snake occupies {0} more than once")]
    SnakeOverlap(Coordinate),
    #[error("default snake leaves no free cell for an apple")]
    SnakeFillsGrid,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub columns: usize,
    /// Height of the game grid
    pub rows: usize,
    /// Milliseconds between ticks
    pub delay_ms: u64,
    /// Body a round starts from, tail first
    pub default_snake: Vec<Coordinate>,
    pub initial_direction: Direction,
    pub collision_reset: CollisionReset,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 20,
            delay_ms: 200,
            default_snake: vec![
                Coordinate::new(10, 9),
                Coordinate::new(10, 10),
                Coordinate::new(10, 11),
            ],
            initial_direction: Direction::Up,
            collision_reset: CollisionReset::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }

    /// Check that a game can start from this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let axis_limit = i32::MAX as usize;
        let too_large = self.columns > axis_limit
            || self.rows > axis_limit
            || self
                .columns
                .checked_mul(self.rows)
                .is_none_or(|cells| cells > MAX_GRID_CELLS);
        if too_large {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.delay_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        if self.default_snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let grid = self.grid();
        let mut seen = HashSet::with_capacity(self.default_snake.len());
        for &cell in &self.default_snake {
            if !grid.contains(cell) {
                return Err(ConfigError::SnakeOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::SnakeOverlap(cell));
            }
        }
        if self.default_snake.len() >= grid.cell_count() {
            return Err(ConfigError::SnakeFillsGrid);
        }

        Ok(())
    }

    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}
