//! AI opponent: move selection pipeline and its supporting searches.
//!
//! The decision engine tries a remote language-model call first (when
//! configured), then falls back locally to the one-ply heuristic scorer,
//! A* pathfinding toward the food, and finally a flood-fill-ranked safe
//! move. Difficulty parameters inject noise ("mistakes") on top.

pub mod heuristics;
pub mod pathfinding;
pub mod remote;
pub mod service;

pub use service::{AiDecisionEngine, MoveDecision, MoveSource};

use std::collections::VecDeque;

use crate::grid::{Direction, Position};

/// Read-only board snapshot the AI decides from.
///
/// Occupancy is evaluated at the pre-move positions: one-ply lookahead
/// only, the opponent's move this tick is not anticipated.
#[derive(Debug, Clone, Copy)]
pub struct AiGameView<'a> {
    pub ai_body: &'a VecDeque<Position>,
    pub ai_direction: Direction,
    pub player_body: &'a VecDeque<Position>,
    pub food: Position,
    pub grid_size: i16,
}

impl AiGameView<'_> {
    pub fn ai_head(&self) -> Option<Position> {
        self.ai_body.front().copied()
    }

    pub fn player_head(&self) -> Option<Position> {
        self.player_body.front().copied()
    }
}

/// Difficulty-derived knobs consumed per decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParams {
    /// Tick interval for the session, milliseconds.
    pub speed_ms: u64,
    /// How strongly the AI should contest the player, 0.0 to 1.0.
    pub aggression: f64,
    /// Probability a computed move is swapped for a random legal one.
    pub mistake_rate: f64,
    /// Sampling temperature forwarded to the remote move source.
    pub temperature: f64,
}

impl Default for AiParams {
    fn default() -> Self {
        AiParams {
            speed_ms: crate::constants::INITIAL_SPEED_MS,
            aggression: 0.5,
            mistake_rate: 0.05,
            temperature: 0.3,
        }
    }
}
