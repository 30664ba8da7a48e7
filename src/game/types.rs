//! Core game types shared between the session, the simulator, and
//! display layers.

use std::collections::VecDeque;

use crate::grid::Position;

/// Session lifecycle. `GameOver` is terminal and only an explicit
/// reset returns to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// What a snake's head ran into this tick, first match in the fixed
/// check order: bounds, own body, opponent body, food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionKind {
    #[default]
    None,
    Wall,
    SelfHit,
    Food,
    AiSnake,
    PlayerSnake,
}

/// How a two-snake game ended. Solo games end without an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    PlayerWin,
    AiWin,
    Draw,
}

/// Everything of note that happened during one `update` call. A call
/// can run several fixed steps; flags accumulate across them.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub steps: u32,
    pub player_ate: bool,
    pub ai_ate: bool,
    pub player_collision: CollisionKind,
    pub ai_collision: CollisionKind,
    pub ai_died: bool,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
    pub new_high_score: bool,
    pub commentary: Vec<String>,
}

/// Read-only view for render layers. Borrows the live body storage,
/// refreshed once per frame.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub state: GameState,
    pub score: u32,
    pub ai_score: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub food: Position,
    pub player_body: &'a VecDeque<Position>,
    pub ai_body: Option<&'a VecDeque<Position>>,
    pub ai_alive: bool,
    pub outcome: Option<GameOutcome>,
}
