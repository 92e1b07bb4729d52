pub mod renderer;
pub mod surface;

pub use renderer::Renderer;
pub use surface::{
    AudioCue, CellState, GridSurface, ScoreBoard, ScoreDisplay, SilentCue, TerminalBell,
    TerminalGrid,
};
