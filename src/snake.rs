//! Snake entity: body segments, buffered direction changes, growth.

use std::collections::VecDeque;

use crate::grid::{Direction, Position};

/// One snake on the grid. The body runs head-first; the tail is the back
/// of the deque. Fields are public so the session (and tests) can inspect
/// and stage board states directly.
#[derive(Debug, Clone)]
pub struct Snake {
    pub body: VecDeque<Position>,
    pub direction: Direction,
    /// Buffered direction applied on the next step. Only the latest request
    /// before a step wins.
    pub next_direction: Direction,
    pub alive: bool,
    /// Reversal prevention only kicks in once the snake has stepped at
    /// least once.
    pub has_moved: bool,
    pub spawn: Position,
    pub spawn_direction: Direction,
    pub spawn_length: usize,
}

impl Snake {
    /// Create a snake with its head at `spawn`, body trailing opposite
    /// `direction`.
    pub fn new(spawn: Position, direction: Direction, length: usize) -> Self {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction,
            next_direction: direction,
            alive: true,
            has_moved: false,
            spawn,
            spawn_direction: direction,
            spawn_length: length,
        };
        snake.lay_body();
        snake
    }

    fn lay_body(&mut self) {
        self.body.clear();
        let (dx, dy) = self.spawn_direction.delta();
        for i in 0..self.spawn_length as i16 {
            self.body.push_back(Position {
                x: self.spawn.x - dx * i,
                y: self.spawn.y - dy * i,
            });
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Advance one cell: commit the buffered direction, push the new head,
    /// drop the tail. Growth after eating is handled separately by `grow`.
    pub fn advance(&mut self) {
        if !self.alive {
            return;
        }
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        self.body.pop_back();
        self.has_moved = true;
    }

    /// Append a segment duplicating the tail. The duplicate separates on
    /// the next advance.
    pub fn grow(&mut self) {
        if !self.alive {
            return;
        }
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Buffer a direction change for the next step. Reversing into the
    /// current direction is ignored once the snake has moved.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !self.alive {
            return;
        }
        if self.has_moved && new_direction == self.direction.opposite() {
            return;
        }
        self.next_direction = new_direction;
    }

    /// Head overlapping any later body segment.
    pub fn self_collision(&self) -> bool {
        if !self.alive || self.body.len() < 2 {
            return false;
        }
        let head = self.head();
        self.body.iter().skip(1).any(|&seg| seg == head)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.iter().any(|&seg| seg == pos)
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Restore the spawn layout and state.
    pub fn reset(&mut self) {
        self.lay_body();
        self.direction = self.spawn_direction;
        self.next_direction = self.spawn_direction;
        self.alive = true;
        self.has_moved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i16, y: i16) -> Snake {
        Snake::new(Position::new(x, y), Direction::Right, 3)
    }

    #[test]
    fn test_new_snake_trails_opposite_direction() {
        let snake = snake_at(10, 10);
        let body: Vec<Position> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ]
        );

        let ai = Snake::new(Position::new(15, 15), Direction::Left, 3);
        let body: Vec<Position> = ai.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(15, 15),
                Position::new(16, 15),
                Position::new(17, 15),
            ]
        );
    }

    #[test]
    fn test_advance_moves_head_one_cell() {
        let mut snake = snake_at(10, 10);
        snake.advance();
        assert_eq!(snake.head(), Position::new(11, 10));
        assert_eq!(snake.len(), 3);
        assert!(snake.has_moved);
    }

    #[test]
    fn test_advance_displacement_accumulates() {
        for dir in Direction::ALL {
            let mut snake = Snake::new(Position::new(50, 50), dir, 3);
            let start = snake.head();
            for _ in 0..7 {
                snake.advance();
            }
            let (dx, dy) = dir.delta();
            assert_eq!(snake.head().x - start.x, dx * 7);
            assert_eq!(snake.head().y - start.y, dy * 7);
        }
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = snake_at(10, 10);
        let tail = snake.tail();
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), tail);
    }

    #[test]
    fn test_grow_is_additive() {
        let mut snake = snake_at(10, 10);
        for _ in 0..5 {
            snake.grow();
        }
        assert_eq!(snake.len(), 8);
    }

    #[test]
    fn test_reversal_blocked_after_first_move() {
        for dir in Direction::ALL {
            let mut snake = Snake::new(Position::new(50, 50), dir, 3);
            snake.advance();
            snake.set_direction(dir.opposite());
            snake.advance();
            assert_eq!(snake.direction, dir);
        }
    }

    #[test]
    fn test_reversal_allowed_before_first_move() {
        let mut snake = snake_at(10, 10);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Left);
    }

    #[test]
    fn test_direction_buffer_last_write_wins() {
        let mut snake = snake_at(10, 10);
        snake.advance();
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Down);
        snake.advance();
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_self_collision_in_tight_loop() {
        let mut snake = snake_at(10, 10);
        for _ in 0..17 {
            snake.grow();
        }
        snake.set_direction(Direction::Right);
        snake.advance();
        snake.advance();
        snake.set_direction(Direction::Down);
        snake.advance();
        snake.advance();
        snake.set_direction(Direction::Left);
        snake.advance();
        snake.advance();
        snake.set_direction(Direction::Up);
        snake.advance();
        snake.advance();
        assert!(snake.self_collision());
    }

    #[test]
    fn test_no_self_collision_when_straight() {
        let mut snake = snake_at(10, 10);
        snake.advance();
        assert!(!snake.self_collision());
    }

    #[test]
    fn test_dead_snake_ignores_commands() {
        let mut snake = snake_at(10, 10);
        snake.kill();
        let head = snake.head();
        snake.advance();
        snake.grow();
        snake.set_direction(Direction::Up);
        assert_eq!(snake.head(), head);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.next_direction, Direction::Right);
    }

    #[test]
    fn test_reset_restores_spawn_layout() {
        let mut snake = Snake::new(Position::new(15, 15), Direction::Left, 3);
        snake.advance();
        snake.grow();
        snake.kill();
        snake.reset();
        assert!(snake.alive);
        assert!(!snake.has_moved);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(15, 15));
        assert_eq!(snake.direction, Direction::Left);
        assert_eq!(snake.body[1], Position::new(16, 15));
    }
}
