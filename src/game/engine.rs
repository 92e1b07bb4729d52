use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    config::{CollisionReset, GameConfig},
    geometry::{Coordinate, step},
    spawn::spawn_apple,
    state::{GameState, Snake},
};

/// What a grid cell is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Snake,
    Apple,
}

/// A change the renderer must apply, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridUpdate {
    /// Clear every cell before the updates that follow
    Reset,
    Cell {
        coord: Coordinate,
        kind: CellKind,
        occupied: bool,
    },
}

impl GridUpdate {
    fn set(coord: Coordinate, kind: CellKind) -> Self {
        GridUpdate::Cell {
            coord,
            kind,
            occupied: true,
        }
    }

    fn clear(coord: Coordinate, kind: CellKind) -> Self {
        GridUpdate::Cell {
            coord,
            kind,
            occupied: false,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Whether the new head ran into the body and the round restarted
    pub collided: bool,
    pub score_changed: bool,
    pub updates: Vec<GridUpdate>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn default_snake(&self) -> Snake {
        Snake::new(self.config.default_snake.iter().copied())
    }

    /// Build the initial state of a game
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = self.default_snake();
        let apple = spawn_apple(&mut self.rng, &snake, grid);

        let mut state = GameState::new(snake, apple, grid, self.config.initial_direction);
        state.done = apple.is_none();
        state
    }

    /// Updates that paint `state` onto a freshly reset grid
    pub fn paint(state: &GameState) -> Vec<GridUpdate> {
        let mut updates = Vec::with_capacity(state.snake.len() + 2);
        updates.push(GridUpdate::Reset);
        updates.extend(state.snake.cells().map(|c| GridUpdate::set(c, CellKind::Snake)));
        updates.extend(state.apple.map(|a| GridUpdate::set(a, CellKind::Apple)));
        updates
    }

    /// Put the default body and a fresh apple back, keeping the directions
    fn restart_round(&mut self, state: &mut GameState, updates: &mut Vec<GridUpdate>) {
        state.score = 0;
        state.snake = self.default_snake();
        state.apple = spawn_apple(&mut self.rng, &state.snake, state.grid);
        if state.apple.is_none() {
            state.done = true;
        }
        updates.extend(Self::paint(state));
    }

    /// Advance the snake by one cell in its current direction.
    ///
    /// The self-collision check runs against the whole body before the tail
    /// moves, so stepping onto the cell the tail is about to leave counts as
    /// a collision.
    pub fn advance(&mut self, state: &mut GameState) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if state.done {
            return outcome;
        }

        let Some(head) = state.snake.head() else {
            self.restart_round(state, &mut outcome.updates);
            outcome.score_changed = true;
            return outcome;
        };

        state.ticks += 1;
        let new_head = step(state.grid, head, state.current_direction);

        if state.snake.occupies(new_head) {
            debug!(
                tick = state.ticks,
                cell = %new_head.cell_id(),
                score = state.score,
                "self-collision, restarting round"
            );
            outcome.collided = true;
            outcome.score_changed = true;
            self.restart_round(state, &mut outcome.updates);

            if self.config.collision_reset == CollisionReset::Clean || state.done {
                return outcome;
            }
        }

        state.snake.push_head(new_head);
        outcome.updates.push(GridUpdate::set(new_head, CellKind::Snake));

        if state.apple == Some(new_head) {
            state.score += 1;
            outcome.ate_apple = true;
            outcome.score_changed = true;
            outcome.updates.push(GridUpdate::clear(new_head, CellKind::Apple));

            state.apple = spawn_apple(&mut self.rng, &state.snake, state.grid);
            match state.apple {
                Some(apple) => {
                    debug!(tick = state.ticks, score = state.score, apple = %apple, "apple eaten");
                    outcome.updates.push(GridUpdate::set(apple, CellKind::Apple));
                }
                None => {
                    info!(score = state.score, length = state.snake.len(), "board full");
                    state.done = true;
                }
            }
        } else if let Some(tail) = state.snake.pop_tail() {
            // A duplicate cell can only survive a compatible-mode reset
            if !state.snake.occupies(tail) {
                outcome.updates.push(GridUpdate::clear(tail, CellKind::Snake));
            }
        }

        outcome
    }
}
