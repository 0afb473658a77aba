use std::fmt;

use crate::GridInt;
use Direction::*;

/// A single grid cell. `+y` points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: GridInt,
    pub y: GridInt,
}

impl Cell {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Cell { x, y }
    }

    pub fn neighbour(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl From<(GridInt, GridInt)> for Cell {
    fn from((x, y): (GridInt, GridInt)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, 1),
            Down => (0, -1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Direction of the single step leading from `from` to `to`, or `None`
    /// when the cells coincide or are not orthogonally adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, 1) => Some(Up),
            (0, -1) => Some(Down),
            (-1, 0) => Some(Left),
            (1, 0) => Some(Right),
            _ => None,
        }
    }

    /// Maps a raw key symbol from the host to a candidate direction.
    pub fn from_symbol(symbol: &str) -> Option<Direction> {
        match symbol {
            "w" | "W" | "Up" | "UpArrow" => Some(Up),
            "s" | "S" | "Down" | "DownArrow" => Some(Down),
            "a" | "A" | "Left" | "LeftArrow" => Some(Left),
            "d" | "D" | "Right" | "RightArrow" => Some(Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Up => "Up",
            Down => "Down",
            Left => "Left",
            Right => "Right",
        };
        f.write_str(name)
    }
}
