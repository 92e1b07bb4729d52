use std::collections::VecDeque;

use super::direction::Direction;
use super::geometry::{Coordinate, GridSize};

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, tail at the front and head at the back
    pub body: VecDeque<Coordinate>,
}

impl Snake {
    /// Build a snake from cells listed tail first
    pub fn new(cells: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Coordinate> {
        self.body.back().copied()
    }

    /// Get the tail position (oldest segment)
    pub fn tail(&self) -> Option<Coordinate> {
        self.body.front().copied()
    }

    /// Check if any segment, tail included, sits on `pos`
    pub fn occupies(&self, pos: Coordinate) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, pos: Coordinate) {
        self.body.push_back(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Coordinate> {
        self.body.pop_front()
    }

    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// The live apple; absent only once the snake covers the whole board
    pub apple: Option<Coordinate>,
    pub grid: GridSize,
    pub score: u32,
    /// Direction applied on the most recent tick
    pub current_direction: Direction,
    /// Latest accepted request, applied on the next tick
    pub pending_direction: Direction,
    /// Set once the loop must stop scheduling ticks
    pub done: bool,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Option<Coordinate>, grid: GridSize, direction: Direction) -> Self {
        Self {
            snake,
            apple,
            grid,
            score: 0,
            current_direction: direction,
            pending_direction: direction,
            done: false,
            ticks: 0,
        }
    }

    /// Record a steering request.
    ///
    /// Requests that reverse the *current* direction are dropped; anything
    /// else overwrites the pending direction, so the last request before a
    /// tick wins. Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.current_direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Promote the pending direction to the one applied this tick
    pub fn apply_pending_direction(&mut self) -> Direction {
        self.current_direction = self.pending_direction;
        self.current_direction
    }
}
