//! One-ply greedy move scorer, the default local AI brain.
//!
//! Each legal move is scored by summing three terms: food proximity,
//! distance from the player's head, and a mild pull toward the board
//! center. No lookahead beyond the candidate cell.

use crate::ai::AiGameView;
use crate::grid::{Direction, Position};

/// Highest-scoring legal move, or `None` when no legal move exists.
/// Ties resolve to the earlier direction in the fixed Up/Down/Left/Right
/// evaluation order.
pub fn best_move(view: &AiGameView) -> Option<Direction> {
    let head = view.ai_head()?;
    let moves = possible_moves(view);
    if moves.is_empty() {
        return None;
    }

    let mut best = moves[0];
    let mut best_score = score_move(view, head.step(best));
    for &dir in moves.iter().skip(1) {
        let score = score_move(view, head.step(dir));
        if score > best_score {
            best = dir;
            best_score = score;
        }
    }
    Some(best)
}

/// Moves that do not reverse, leave the grid, or land on either snake's
/// current body. One-ply only: cells the opponent is about to vacate or
/// enter this tick are not modeled.
pub fn possible_moves(view: &AiGameView) -> Vec<Direction> {
    let head = match view.ai_head() {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut moves = Vec::new();
    for dir in Direction::ALL {
        if dir == view.ai_direction.opposite() {
            continue;
        }
        let next = head.step(dir);
        if !next.in_bounds(view.grid_size) {
            continue;
        }
        if view.ai_body.contains(&next) || view.player_body.contains(&next) {
            continue;
        }
        moves.push(dir);
    }
    moves
}

fn score_move(view: &AiGameView, new_head: Position) -> i32 {
    food_score(new_head, view.food)
        + evasion_score(new_head, view)
        + center_score(new_head, view.grid_size)
}

/// Closer to the food is better.
fn food_score(new_head: Position, food: Position) -> i32 {
    100 - new_head.manhattan(food)
}

/// Farther from the player's head is safer.
fn evasion_score(new_head: Position, view: &AiGameView) -> i32 {
    match view.player_head() {
        Some(player_head) => 2 * new_head.manhattan(player_head),
        None => 0,
    }
}

/// Staying near the center keeps more future options open.
fn center_score(new_head: Position, grid_size: i16) -> i32 {
    let center = Position::new(grid_size / 2, grid_size / 2);
    20 - new_head.manhattan(center)
}
