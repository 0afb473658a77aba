use std::collections::HashSet;

use crate::board::Board;
use crate::direction::Cell;
use crate::snake::{SnakeState, TickOutcome};

/// What, if anything, sits in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Food,
    Wall,
    Body,
}

impl Occupant {
    pub fn is_obstacle(self) -> bool {
        matches!(self, Occupant::Wall | Occupant::Body)
    }
}

/// Answers occupancy queries for the snake's next cell. Hosts with their
/// own spatial index (a physics engine, a tile map) implement this directly.
pub trait OccupancyOracle {
    fn occupant(&self, cell: Cell) -> Occupant;
}

impl<F> OccupancyOracle for F
where
    F: Fn(Cell) -> Occupant,
{
    fn occupant(&self, cell: Cell) -> Occupant {
        self(cell)
    }
}

/// Spatial index of the board: walls, snake segments and the food cell.
/// Kept in sync with the snake by feeding it every tick outcome.
#[derive(Debug, Clone)]
pub struct Playfield {
    board: Board,
    segments: HashSet<Cell>,
    food: Option<Cell>,
}

impl Playfield {
    pub fn new(board: Board, snake: &SnakeState) -> Self {
        Playfield {
            board,
            segments: snake.body().iter().copied().collect(),
            food: None,
        }
    }

    pub fn segments(&self) -> &HashSet<Cell> {
        &self.segments
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }

    /// Re-reads every segment, used after a reset.
    pub fn sync(&mut self, snake: &SnakeState) {
        self.segments.clear();
        self.segments.extend(snake.body().iter().copied());
    }

    pub fn apply(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Moved { head, vacated } => {
                self.segments.remove(&vacated);
                self.segments.insert(head);
            }
            TickOutcome::Ate { head } | TickOutcome::Won { head, .. } => {
                self.segments.insert(head);
                self.food = None;
            }
            TickOutcome::Died { .. } | TickOutcome::Idle => {}
        }
    }
}

impl OccupancyOracle for Playfield {
    fn occupant(&self, cell: Cell) -> Occupant {
        if self.food == Some(cell) {
            Occupant::Food
        } else if !self.board.contains(cell) {
            Occupant::Wall
        } else if self.segments.contains(&cell) {
            Occupant::Body
        } else {
            Occupant::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    fn field() -> (Board, SnakeState, Playfield) {
        let board = Board::default();
        let snake = SnakeState::new(&board, 3).unwrap();
        let field = Playfield::new(board, &snake);
        (board, snake, field)
    }

    #[test]
    fn test_classification() {
        let (_, _, mut field) = field();
        field.set_food(Some(Cell::new(3, 3)));

        assert_eq!(field.occupant(Cell::new(3, 3)), Occupant::Food);
        assert_eq!(field.occupant(Cell::new(-1, 0)), Occupant::Body);
        assert_eq!(field.occupant(Cell::new(0, 0)), Occupant::Body);
        assert_eq!(field.occupant(Cell::new(1, 0)), Occupant::Empty);
        assert_eq!(field.occupant(Cell::new(8, 0)), Occupant::Wall);
        assert_eq!(field.occupant(Cell::new(0, -6)), Occupant::Wall);
    }

    #[test]
    fn test_tracks_moves() {
        let (board, mut snake, mut field) = field();

        let outcome = snake.tick(&board, &field);
        field.apply(outcome);
        assert_eq!(outcome, TickOutcome::Moved { head: Cell::new(1, 0), vacated: Cell::new(-2, 0) });
        assert_eq!(field.occupant(Cell::new(-2, 0)), Occupant::Empty);
        assert_eq!(field.occupant(Cell::new(1, 0)), Occupant::Body);

        field.set_food(Some(Cell::new(2, 0)));
        let outcome = snake.tick(&board, &field);
        field.apply(outcome);
        assert_eq!(outcome, TickOutcome::Ate { head: Cell::new(2, 0) });
        assert_eq!(field.food(), None);
        assert_eq!(field.segments().len(), snake.len());
        assert_eq!(snake.heading(), Direction::Right);
    }

    #[test]
    fn test_closure_oracle() {
        let oracle = |cell: Cell| if cell.x > 0 { Occupant::Wall } else { Occupant::Empty };
        assert_eq!(oracle.occupant(Cell::new(1, 0)), Occupant::Wall);
        assert!(oracle.occupant(Cell::new(1, 0)).is_obstacle());
        assert!(!oracle.occupant(Cell::new(0, 0)).is_obstacle());
    }
}
