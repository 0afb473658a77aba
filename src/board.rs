use std::collections::HashSet;

use log::{error, warn};
use rand::{seq::SliceRandom, Rng};

use crate::direction::Cell;
use crate::error::GameError;
use crate::GridInt;

pub const DEFAULT_WIDTH: GridInt = 15;
pub const DEFAULT_HEIGHT: GridInt = 10;
pub const MAX_DIMENSION: GridInt = 1024;

/// Random draws attempted before falling back to scanning every free cell.
const MAX_FOOD_ATTEMPTS: usize = 64;

/// The playing field. Cells are centred on the origin: x runs over
/// `[-(width / 2), -(width / 2) + width)` and y likewise, so the region
/// always holds exactly `width * height` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: GridInt,
    height: GridInt,
}

impl Default for Board {
    fn default() -> Self {
        Board { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

impl Board {
    pub fn new(width: GridInt, height: GridInt) -> Result<Self, GameError> {
        if !valid_dimension(width) || !valid_dimension(height) {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Board { width, height })
    }

    /// Builds a board from free-text configuration, falling back to 15x10
    /// for anything missing or unusable.
    pub fn from_raw(raw_width: Option<&str>, raw_height: Option<&str>) -> Self {
        Board {
            width: resolve_dimension(raw_width, DEFAULT_WIDTH),
            height: resolve_dimension(raw_height, DEFAULT_HEIGHT),
        }
    }

    pub fn width(&self) -> GridInt {
        self.width
    }

    pub fn height(&self) -> GridInt {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn min_x(&self) -> GridInt {
        -(self.width / 2)
    }

    /// Exclusive.
    pub fn max_x(&self) -> GridInt {
        self.min_x() + self.width
    }

    pub fn min_y(&self) -> GridInt {
        -(self.height / 2)
    }

    /// Exclusive.
    pub fn max_y(&self) -> GridInt {
        self.min_y() + self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x()..self.max_x()).contains(&cell.x) && (self.min_y()..self.max_y()).contains(&cell.y)
    }

    /// Every cell on the board, row by row from the bottom.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (min_x, max_x) = (self.min_x(), self.max_x());
        (self.min_y()..self.max_y()).flat_map(move |y| (min_x..max_x).map(move |x| Cell::new(x, y)))
    }

    /// Picks a random cell that is not in `occupied`, or `None` when the
    /// board is already full. Draws cover the same region as `contains`,
    /// so every playable cell can hold food.
    pub fn place_food<R: Rng + ?Sized>(&self, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
        if occupied.len() >= self.area() {
            return None;
        }

        for _ in 0..MAX_FOOD_ATTEMPTS {
            let cell = Cell::new(
                rng.gen_range(self.min_x()..self.max_x()),
                rng.gen_range(self.min_y()..self.max_y()),
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }

        warn!(
            "no free cell after {} random draws ({} of {} occupied), scanning the board",
            MAX_FOOD_ATTEMPTS,
            occupied.len(),
            self.area()
        );

        let free: Vec<Cell> = self.cells().filter(|cell| !occupied.contains(cell)).collect();
        let res = free.choose(rng).copied();
        if res.is_none() {
            error!("board has no free cell although only {} of {} cells are occupied", occupied.len(), self.area());
        }
        res
    }
}

/// Parses a board dimension from optional free text. Missing or unparsable
/// text yields `default`; so does a parsed value outside `1..=MAX_DIMENSION`.
pub fn resolve_dimension(raw: Option<&str>, default: GridInt) -> GridInt {
    let parsed = match raw.map(str::trim).map(str::parse::<GridInt>) {
        Some(Ok(value)) => value,
        _ => return default,
    };

    if valid_dimension(parsed) {
        parsed
    } else {
        warn!("board dimension {} is out of range, using {}", parsed, default);
        default
    }
}

fn valid_dimension(value: GridInt) -> bool {
    (1..=MAX_DIMENSION).contains(&value)
}
