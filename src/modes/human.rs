use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::game_loop::{GameLoop, LoopPhase, Outputs};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::renderer::FrameView;
use crate::render::{AudioCue, Renderer, ScoreBoard, SilentCue, TerminalBell, TerminalGrid};

pub struct HumanMode {
    game: GameLoop,
    grid: TerminalGrid,
    score: ScoreBoard,
    audio: Box<dyn AudioCue>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, muted: bool) -> Self {
        let audio: Box<dyn AudioCue> = if muted {
            Box::new(SilentCue::default())
        } else {
            Box::new(TerminalBell)
        };

        let mut mode = Self {
            game: GameLoop::new(config),
            grid: TerminalGrid::new(),
            score: ScoreBoard::default(),
            audio,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        };
        let mut out = Outputs {
            grid: &mut mode.grid,
            score: &mut mode.score,
            audio: mode.audio.as_mut(),
        };
        mode.game.start(&mut out);
        mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            high_score = self.metrics.high_score,
            apples = self.metrics.apples_eaten,
            restarts = self.metrics.restarts,
            elapsed = %self.metrics.format_time(),
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.game.tick_delay());
        // Ticks never overlap or burst after a stall
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick(), if self.game.phase() == LoopPhase::Running => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let view = FrameView {
                        grid: &self.grid,
                        head: self.game.state().snake.head(),
                        score: &self.score,
                        metrics: &self.metrics,
                        stopped: self.game.phase() == LoopPhase::Stopped,
                    };
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    let accepted = self.game.steer(direction);
                    debug!(?direction, accepted, "steer request");
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let mut out = Outputs {
            grid: &mut self.grid,
            score: &mut self.score,
            audio: self.audio.as_mut(),
        };

        if let Some(outcome) = self.game.tick(&mut out) {
            self.metrics.on_tick(&outcome, self.game.state().score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
