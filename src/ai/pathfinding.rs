//! A* search toward the food plus flood-fill open-space scoring.
//!
//! Both searches treat snake bodies as a dynamic obstacle set and bound
//! their work so a decision never stalls a tick: A* stops at a fixed
//! expansion cap and the flood fill stops counting at a fixed cell budget.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::constants::{MAX_SEARCH_ITERATIONS, OPEN_SPACE_CAP};
use crate::grid::{Direction, Position};

/// A* with a Manhattan heuristic on the 4-connected grid.
///
/// The open set is an unsorted list scanned for the minimum f-score;
/// ties resolve to whichever node was discovered first, which together
/// with the fixed Up/Down/Left/Right neighbor order makes paths
/// deterministic. Returns `None` if no path exists or the expansion cap
/// is hit. `start == goal` yields a one-element path.
pub fn find_path(
    start: Position,
    goal: Position,
    obstacles: &HashSet<Position>,
    grid_size: i16,
) -> Option<Vec<Position>> {
    let mut open: Vec<Position> = vec![start];
    let mut closed: HashSet<Position> = HashSet::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, i32> = HashMap::new();
    let mut f_score: HashMap<Position, i32> = HashMap::new();

    g_score.insert(start, 0);
    f_score.insert(start, start.manhattan(goal));

    let mut iterations = 0;
    while !open.is_empty() && iterations < MAX_SEARCH_ITERATIONS {
        iterations += 1;

        let mut best = 0;
        let mut best_f = f_score.get(&open[0]).copied().unwrap_or(i32::MAX);
        for (i, pos) in open.iter().enumerate().skip(1) {
            let f = f_score.get(pos).copied().unwrap_or(i32::MAX);
            if f < best_f {
                best = i;
                best_f = f;
            }
        }
        let current = open[best];

        if current == goal {
            return Some(reconstruct_path(&came_from, current));
        }

        open.remove(best);
        closed.insert(current);

        let current_g = g_score.get(&current).copied().unwrap_or(0);
        for neighbor in current.neighbors(grid_size) {
            if closed.contains(&neighbor) || obstacles.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            if !open.contains(&neighbor) {
                open.push(neighbor);
            } else if tentative_g >= g_score.get(&neighbor).copied().unwrap_or(i32::MAX) {
                continue;
            }

            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative_g);
            f_score.insert(neighbor, tentative_g + neighbor.manhattan(goal));
        }
    }

    None
}

/// First step of the A* path from `start` to `goal`, or `None` when no
/// usable path exists. Both snakes' bodies block the search except for
/// their heads (a head cell is contestable).
pub fn next_move_to(
    start: Position,
    goal: Position,
    player_body: &VecDeque<Position>,
    ai_body: &VecDeque<Position>,
    grid_size: i16,
) -> Option<Direction> {
    let mut obstacles: HashSet<Position> = HashSet::new();
    obstacles.extend(player_body.iter().skip(1).copied());
    obstacles.extend(ai_body.iter().skip(1).copied());

    let path = find_path(start, goal, &obstacles, grid_size)?;
    if path.len() < 2 {
        return None;
    }
    Some(direction_between(start, path[1]))
}

/// Legal non-reversing move that keeps the most open space reachable,
/// ranked by flood fill. `None` when every move is blocked. The full
/// player body counts as an obstacle here, but the AI's own head cell is
/// skipped (it vacates this tick).
pub fn find_safe_move(
    head: Position,
    current_direction: Direction,
    player_body: &VecDeque<Position>,
    ai_body: &VecDeque<Position>,
    grid_size: i16,
) -> Option<Direction> {
    let mut obstacles: HashSet<Position> = player_body.iter().copied().collect();
    obstacles.extend(ai_body.iter().skip(1).copied());

    let mut safe_moves: Vec<Direction> = Vec::new();
    for dir in Direction::ALL {
        if dir == current_direction.opposite() {
            continue;
        }
        let next = head.step(dir);
        if !next.in_bounds(grid_size) || obstacles.contains(&next) {
            continue;
        }
        safe_moves.push(dir);
    }

    if safe_moves.is_empty() {
        return None;
    }

    let mut best = safe_moves[0];
    let mut best_score = open_space_score(head.step(best), &obstacles, grid_size);
    for &dir in safe_moves.iter().skip(1) {
        let score = open_space_score(head.step(dir), &obstacles, grid_size);
        if score > best_score {
            best = dir;
            best_score = score;
        }
    }
    Some(best)
}

/// Count cells reachable from `start` by flood fill, capped at
/// `OPEN_SPACE_CAP`. Higher means less risk of self-trapping.
pub fn open_space_score(
    start: Position,
    obstacles: &HashSet<Position>,
    grid_size: i16,
) -> usize {
    let mut visited: HashSet<Position> = HashSet::new();
    let mut queue: VecDeque<Position> = VecDeque::new();
    queue.push_back(start);
    let mut open_cells = 0;

    while let Some(pos) = queue.pop_front() {
        if open_cells >= OPEN_SPACE_CAP {
            break;
        }
        if !visited.insert(pos) {
            continue;
        }
        open_cells += 1;

        for neighbor in pos.neighbors(grid_size) {
            if !visited.contains(&neighbor) && !obstacles.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    open_cells
}

/// Direction from a cell to an adjacent cell. Falls back to `Right` for
/// non-adjacent input.
pub fn direction_between(from: Position, to: Position) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 1 {
        Direction::Right
    } else if dx == -1 {
        Direction::Left
    } else if dy == 1 {
        Direction::Down
    } else if dy == -1 {
        Direction::Up
    } else {
        Direction::Right
    }
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}
