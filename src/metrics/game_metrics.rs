use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Per-session counters shown in the header. Nothing here is persisted.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub apples_eaten: u32,
    /// Rounds restarted by a self-collision
    pub restarts: u32,
    pub ticks: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            apples_eaten: 0,
            restarts: 0,
            ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold one tick into the counters; `score` is the score after the tick
    pub fn on_tick(&mut self, outcome: &TickOutcome, score: u32) {
        self.ticks += 1;
        if outcome.ate_apple {
            self.apples_eaten += 1;
        }
        if outcome.collided {
            self.restarts += 1;
        }
        self.high_score = self.high_score.max(score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut metrics = GameMetrics::new();
        let ate = TickOutcome {
            ate_apple: true,
            score_changed: true,
            ..Default::default()
        };
        let crash = TickOutcome {
            collided: true,
            score_changed: true,
            ..Default::default()
        };

        metrics.on_tick(&ate, 1);
        metrics.on_tick(&ate, 2);
        metrics.on_tick(&crash, 0);
        metrics.on_tick(&ate, 1);

        assert_eq!(metrics.high_score, 2);
        assert_eq!(metrics.apples_eaten, 3);
        assert_eq!(metrics.restarts, 1);
        assert_eq!(metrics.ticks, 4);
    }

    #[test]
    fn test_elapsed_time_advances() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 20);
    }
}
