//! Torus Snake - Snake on a wrap-around grid, played in the terminal
//!
//! This library provides:
//! - Core game logic (game module): geometry, apple spawning, the tick engine
//! - Output collaborators and the TUI renderer (render module)
//! - Keyboard mapping (input module)
//! - Session counters (metrics module)
//! - The tick scheduling loop plus interactive and headless modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
