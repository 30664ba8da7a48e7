//! Food placement.

use std::collections::HashSet;

use rand::Rng;

use crate::constants::FOOD_SPAWN_ATTEMPTS;
use crate::grid::Position;

/// Pick a random free cell for the food. Retries up to the attempt budget;
/// if every draw lands on a snake, the last candidate is used even though
/// it is occupied.
// TODO: fall back to an exhaustive free-cell scan when the random budget
// runs out instead of accepting an occupied cell.
pub fn spawn_food<R: Rng>(occupied: &HashSet<Position>, grid_size: i16, rng: &mut R) -> Position {
    let mut pos = Position::new(0, 0);
    for _ in 0..FOOD_SPAWN_ATTEMPTS {
        pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !occupied.contains(&pos) {
            return pos;
        }
    }
    pos
}
