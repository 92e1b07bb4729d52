use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::surface::{ScoreBoard, TerminalGrid};
use crate::game::Coordinate;
use crate::metrics::GameMetrics;

/// Everything a frame shows
pub struct FrameView<'a> {
    pub grid: &'a TerminalGrid,
    pub head: Option<Coordinate>,
    pub score: &'a ScoreBoard,
    pub metrics: &'a GameMetrics,
    pub stopped: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &FrameView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(view), game_area);
        frame.render_widget(self.render_controls(view.stopped), chunks[2]);
    }

    /// Row `rows - 1` is drawn at the top so that "up" moves up the screen
    fn render_grid(&self, view: &FrameView<'_>) -> Paragraph<'static> {
        let size = view.grid.size();
        let mut lines = Vec::with_capacity(size.rows);

        for y in (0..size.rows as i32).rev() {
            let mut spans = Vec::with_capacity(size.columns);

            for x in 0..size.columns as i32 {
                let pos = Coordinate::new(x, y);
                let cell = view.grid.cell(pos);

                let span = if cell.snake && view.head == Some(pos) {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if cell.snake {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell.apple {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let border = if view.stopped { Color::Red } else { Color::White };
        let title = if view.stopped { " Board full " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &FrameView<'_>) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                view.score.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(view.metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Apples: ", label),
            Span::styled(view.metrics.apples_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Restarts: ", label),
            Span::styled(view.metrics.restarts.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, stopped: bool) -> Paragraph<'static> {
        let text = if stopped {
            vec![Line::from(vec![
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
