//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board is a torus: the snake leaves one edge and re-enters on the opposite one.

pub mod config;
pub mod direction;
pub mod engine;
pub mod geometry;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use config::{CollisionReset, ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{CellKind, GameEngine, GridUpdate, TickOutcome};
pub use geometry::{Coordinate, GridSize, random_coordinate, wrap_add};
pub use spawn::spawn_apple;
pub use state::{GameState, Snake};
