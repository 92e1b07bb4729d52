//! Run the game with no terminal attached
//!
//! The snake is steered by a fixed turn pattern instead of a keyboard. Ticks
//! are applied back to back with no delay; the result is reported through
//! tracing and returned to the caller.

use tracing::info;

use super::game_loop::{GameLoop, Outputs};
use crate::game::{Direction, GameConfig};
use crate::metrics::GameMetrics;
use crate::render::{ScoreBoard, SilentCue, TerminalGrid};

/// Summary of a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessReport {
    pub ticks_run: u64,
    pub final_score: u32,
    pub final_length: usize,
    pub high_score: u32,
    pub apples_eaten: u32,
    pub restarts: u32,
    pub stopped: bool,
}

pub struct HeadlessMode {
    game: GameLoop,
    grid: TerminalGrid,
    score: ScoreBoard,
    audio: SilentCue,
    metrics: GameMetrics,
    /// Ticks between turns of the steering pattern
    turn_every: u64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig) -> Self {
        let mut mode = Self {
            game: GameLoop::new(config),
            grid: TerminalGrid::new(),
            score: ScoreBoard::default(),
            audio: SilentCue::default(),
            metrics: GameMetrics::new(),
            turn_every: 6,
        };
        let mut out = Outputs {
            grid: &mut mode.grid,
            score: &mut mode.score,
            audio: &mut mode.audio,
        };
        mode.game.start(&mut out);
        mode
    }

    /// Steering request for tick `n`: a clockwise square loop
    fn scripted_direction(&self, n: u64) -> Direction {
        const TURNS: [Direction; 4] = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        TURNS[((n / self.turn_every) % TURNS.len() as u64) as usize]
    }

    /// Apply up to `ticks` ticks, stopping early if the loop stops
    pub fn run(&mut self, ticks: u64) -> HeadlessReport {
        info!(ticks, "headless run started");

        let mut ticks_run = 0;
        for n in 0..ticks {
            let direction = self.scripted_direction(n);
            self.game.steer(direction);
            let mut out = Outputs {
                grid: &mut self.grid,
                score: &mut self.score,
                audio: &mut self.audio,
            };
            let Some(outcome) = self.game.tick(&mut out) else {
                break;
            };
            ticks_run += 1;
            self.metrics.on_tick(&outcome, self.game.state().score);
        }
        self.metrics.update();

        let state = self.game.state();
        let report = HeadlessReport {
            ticks_run,
            final_score: state.score,
            final_length: state.snake.len(),
            high_score: self.metrics.high_score,
            apples_eaten: self.metrics.apples_eaten,
            restarts: self.metrics.restarts,
            stopped: state.done,
        };

        info!(
            ticks_run = report.ticks_run,
            final_score = report.final_score,
            final_length = report.final_length,
            high_score = report.high_score,
            apples_eaten = report.apples_eaten,
            restarts = report.restarts,
            stopped = report.stopped,
            eat_cues = self.audio.played,
            elapsed = %self.metrics.format_time(),
            "headless run completed"
        );

        report
    }
}
