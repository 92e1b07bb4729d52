pub mod game_loop;
pub mod headless;
pub mod human;

pub use game_loop::{GameLoop, LoopPhase, Outputs};
pub use headless::{HeadlessMode, HeadlessReport};
pub use human::HumanMode;
