//! Tick scheduling state machine shared by every mode
//!
//! A [`GameLoop`] owns the engine and the only game state. Input and ticks
//! both reach it through `&mut self`, so a caller that drives it from one
//! task (as the modes do) needs no locking.

use std::time::Duration;

use tracing::info;

use crate::game::{Direction, GameConfig, GameEngine, GameState, GridUpdate, TickOutcome};
use crate::render::{AudioCue, GridSurface, ScoreDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Running,
    /// Terminal: no tick is ever applied again
    Stopped,
}

/// Collaborators a tick reports to
pub struct Outputs<'a> {
    pub grid: &'a mut dyn GridSurface,
    pub score: &'a mut dyn ScoreDisplay,
    pub audio: &'a mut dyn AudioCue,
}

pub struct GameLoop {
    engine: GameEngine,
    state: GameState,
    phase: LoopPhase,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let phase = if state.done {
            LoopPhase::Stopped
        } else {
            LoopPhase::Running
        };

        Self {
            engine,
            state,
            phase,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.engine.config().delay_ms)
    }

    /// Paint the initial board and score
    pub fn start(&mut self, out: &mut Outputs<'_>) {
        let updates = GameEngine::paint(&self.state);
        self.apply(&updates, out);
        out.score.show_score(self.state.score);
        info!(
            columns = self.state.grid.columns,
            rows = self.state.grid.rows,
            "game started"
        );
    }

    /// Forward a steering request; see [`GameState::request_direction`]
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.state.request_direction(direction)
    }

    /// Run one scheduled tick.
    ///
    /// Returns `None` once the loop has stopped.
    pub fn tick(&mut self, out: &mut Outputs<'_>) -> Option<TickOutcome> {
        if self.phase == LoopPhase::Stopped {
            return None;
        }

        self.state.apply_pending_direction();
        let outcome = self.engine.advance(&mut self.state);
        self.apply(&outcome.updates, out);

        if outcome.score_changed {
            out.score.show_score(self.state.score);
        }
        if outcome.ate_apple {
            out.audio.play_eat_sound();
        }
        if self.state.done {
            info!(score = self.state.score, ticks = self.state.ticks, "game loop stopped");
            self.phase = LoopPhase::Stopped;
        }

        Some(outcome)
    }

    fn apply(&self, updates: &[GridUpdate], out: &mut Outputs<'_>) {
        for update in updates {
            match *update {
                GridUpdate::Reset => out.grid.reset_grid(self.state.grid.rows, self.state.grid.columns),
                GridUpdate::Cell {
                    coord,
                    kind,
                    occupied,
                } => out.grid.set_cell_occupied(coord, kind, occupied),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellKind, Coordinate, GridSize};
    use crate::render::{ScoreBoard, SilentCue, TerminalGrid};

    struct Harness {
        grid: TerminalGrid,
        score: ScoreBoard,
        audio: SilentCue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                grid: TerminalGrid::new(),
                score: ScoreBoard::default(),
                audio: SilentCue::default(),
            }
        }

        fn outputs(&mut self) -> Outputs<'_> {
            Outputs {
                grid: &mut self.grid,
                score: &mut self.score,
                audio: &mut self.audio,
            }
        }
    }

    fn seeded() -> GameConfig {
        GameConfig {
            seed: Some(9),
            ..Default::default()
        }
    }

    /// The buffered grid shows exactly the snake and apple in `state`
    fn assert_grid_matches(grid: &TerminalGrid, state: &GameState) {
        for cell in state.grid.cells() {
            let shown = grid.cell(cell);
            assert_eq!(shown.snake, state.snake.occupies(cell), "snake at {cell}");
            assert_eq!(shown.apple, state.apple == Some(cell), "apple at {cell}");
        }
    }

    #[test]
    fn test_start_paints_board() {
        let mut harness = Harness::new();
        let mut game = GameLoop::new(seeded());
        game.start(&mut harness.outputs());

        assert_eq!(game.phase(), LoopPhase::Running);
        assert_eq!(harness.grid.size(), GridSize::new(20, 20));
        assert_eq!(harness.grid.count(CellKind::Snake), 3);
        assert_eq!(harness.grid.count(CellKind::Apple), 1);
        assert_grid_matches(&harness.grid, game.state());
    }

    #[test]
    fn test_pending_direction_applied_on_tick() {
        let mut harness = Harness::new();
        let mut game = GameLoop::new(seeded());
        game.state.apple = Some(Coordinate::new(0, 0));
        game.start(&mut harness.outputs());

        // Last accepted request before the tick wins
        assert!(game.steer(Direction::Left));
        assert!(game.steer(Direction::Right));
        assert!(!game.steer(Direction::Down));
        game.tick(&mut harness.outputs());

        assert_eq!(game.state().current_direction, Direction::Right);
        assert_eq!(game.state().snake.head(), Some(Coordinate::new(11, 11)));
    }

    #[test]
    fn test_grid_tracks_state_over_many_ticks() {
        let mut harness = Harness::new();
        let mut game = GameLoop::new(seeded());
        game.start(&mut harness.outputs());
        let turns = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

        for i in 0..600 {
            game.steer(turns[(i / 7) % turns.len()]);
            game.tick(&mut harness.outputs());
            assert_grid_matches(&harness.grid, game.state());
            assert_eq!(harness.score.score, game.state().score);
        }
    }

    #[test]
    fn test_eating_plays_sound_and_shows_score() {
        let mut harness = Harness::new();
        let mut game = GameLoop::new(seeded());
        // Place the apple in the snake's path before the board is painted
        game.state.apple = Some(Coordinate::new(10, 12));
        game.start(&mut harness.outputs());

        let outcome = game.tick(&mut harness.outputs()).unwrap();

        assert!(outcome.ate_apple);
        assert_eq!(harness.audio.played, 1);
        assert_eq!(harness.score.score, 1);
        assert_grid_matches(&harness.grid, game.state());
    }

    #[test]
    fn test_board_full_stops_loop() {
        let mut harness = Harness::new();
        let mut game = GameLoop::new(GameConfig {
            columns: 4,
            rows: 1,
            default_snake: vec![Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0)],
            initial_direction: Direction::Right,
            seed: Some(1),
            ..Default::default()
        });
        game.start(&mut harness.outputs());
        assert_eq!(game.state().apple, Some(Coordinate::new(3, 0)));

        assert!(game.tick(&mut harness.outputs()).is_some());
        assert_eq!(game.phase(), LoopPhase::Stopped);
        assert!(game.state().done);

        let snapshot = game.state().clone();
        assert!(game.tick(&mut harness.outputs()).is_none());
        assert_eq!(game.state(), &snapshot);
    }
}
