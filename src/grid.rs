//! Grid primitives shared by the snakes, the food spawner, and the AI.

/// A cell on the play grid. Coordinates may go out of bounds transiently
/// (a head that just crossed a wall) so collision checks can see where the
/// snake ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    /// The adjacent cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self, grid_size: i16) -> bool {
        self.x >= 0 && self.x < grid_size && self.y >= 0 && self.y < grid_size
    }

    /// Manhattan distance, the A* heuristic on a 4-connected grid.
    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x as i32 - other.x as i32).abs() + (self.y as i32 - other.y as i32).abs()
    }

    /// In-bounds adjacent cells in the fixed Up, Down, Left, Right order.
    pub fn neighbors(&self, grid_size: i16) -> Vec<Position> {
        let mut result = Vec::with_capacity(4);
        for dir in Direction::ALL {
            let next = self.step(dir);
            if next.in_bounds(grid_size) {
                result.push(next);
            }
        }
        result
    }
}

/// One of the four grid directions. `ALL` fixes the evaluation order used
/// by every tie-break in the AI: Up, Down, Left, Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector for this direction. Up is negative y.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Uppercase token used in remote prompts and replies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}
