use std::collections::{HashSet, VecDeque};

use log::{debug, error, info};

use crate::board::Board;
use crate::direction::{Cell, Direction};
use crate::error::GameError;
use crate::occupancy::{Occupant, OccupancyOracle};
use Direction::*;

pub const START_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Alive,
    Dead,
    Won,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Plain move: the tail segment at `vacated` was relocated to `head`.
    Moved { head: Cell, vacated: Cell },
    Ate { head: Cell },
    Died { score: usize },
    /// The snake ate its way to filling the board. Supersedes `Ate`.
    Won { head: Cell, score: usize },
    /// The snake is not alive, nothing happened.
    Idle,
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Died { .. } | TickOutcome::Won { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Head first.
    body: VecDeque<Cell>,
    heading: Direction,
    status: Status,
    start_length: usize,
}

impl SnakeState {
    pub fn new(board: &Board, start_length: usize) -> Result<Self, GameError> {
        let body = initial_body(board, start_length)?;
        Ok(SnakeState { body, heading: Right, status: Status::Alive, start_length })
    }

    /// Rebuilds a snake from an explicit body (head first), e.g. to resume a
    /// game or to stage a position.
    pub fn from_parts(
        body: impl IntoIterator<Item = Cell>,
        heading: Direction,
        start_length: usize,
    ) -> Result<Self, GameError> {
        if start_length < START_LENGTH {
            return Err(GameError::StartLengthTooShort { length: start_length });
        }

        let body: VecDeque<Cell> = body.into_iter().collect();
        if body.len() < 2 {
            return Err(GameError::BodyTooShort { length: body.len() });
        }

        let mut seen = HashSet::with_capacity(body.len());
        for (index, cell) in body.iter().enumerate() {
            if !seen.insert(*cell) {
                return Err(GameError::OverlappingBody(*cell));
            }
            if let Some(next) = body.get(index + 1) {
                if Direction::between(*next, *cell).is_none() {
                    return Err(GameError::DisconnectedBody { index });
                }
            }
        }

        let snake = SnakeState { body, heading, status: Status::Alive, start_length };
        if snake.effective_direction() == Some(heading.opposite()) {
            return Err(GameError::ReversedHeading { heading });
        }
        Ok(snake)
    }

    /// Resets to a fresh, living snake of `start_length` segments lying on
    /// the x axis with its head at the origin, heading right.
    pub fn init(&mut self, board: &Board, start_length: usize) -> Result<(), GameError> {
        self.body = initial_body(board, start_length)?;
        self.heading = Right;
        self.status = Status::Alive;
        self.start_length = start_length;
        debug!("snake reset with {} segments", start_length);
        Ok(())
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    pub fn is_dead(&self) -> bool {
        self.status == Status::Dead
    }

    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    pub fn start_length(&self) -> usize {
        self.start_length
    }

    pub fn score(&self) -> usize {
        self.body.len().saturating_sub(self.start_length)
    }

    /// The direction the snake actually travelled last, read from the
    /// positions of the head and the segment behind it.
    pub fn effective_direction(&self) -> Option<Direction> {
        Direction::between(self.body[1], self.body[0])
    }

    /// Turns the snake according to a raw key symbol. Returns the heading
    /// that will be used on the next tick.
    pub fn propose_heading(&mut self, symbol: &str) -> Direction {
        match Direction::from_symbol(symbol) {
            Some(candidate) => self.steer(candidate),
            None => self.heading,
        }
    }

    /// Sets the heading unless the snake is not alive or `candidate` would
    /// reverse it onto its own neck.
    ///
    /// The check uses the body geometry rather than the stored heading, so
    /// several key presses between two ticks can never add up to a reversal.
    pub fn steer(&mut self, candidate: Direction) -> Direction {
        if !self.is_alive() {
            return self.heading;
        }

        let current = self.effective_direction();
        debug_assert!(current.is_some(), "snake body is not contiguous at the head");
        let current = match current {
            Some(dir) => dir,
            None => {
                error!("head {} and neck {} are not adjacent", self.body[0], self.body[1]);
                return self.heading;
            }
        };

        if candidate != current.opposite() {
            self.heading = candidate;
        }
        self.heading
    }

    /// Advances the snake by one cell.
    pub fn tick<O: OccupancyOracle + ?Sized>(&mut self, board: &Board, oracle: &O) -> TickOutcome {
        if !self.is_alive() || self.body.len() >= board.area() {
            return TickOutcome::Idle;
        }

        let next = self.head().neighbour(self.heading);
        let occupant = oracle.occupant(next);

        if occupant.is_obstacle() {
            self.status = Status::Dead;
            info!("crashed into {:?} at {}, score {}", occupant, next, self.score());
            return TickOutcome::Died { score: self.score() };
        }

        if occupant == Occupant::Food {
            self.body.push_front(next);
            if self.body.len() >= board.area() {
                self.status = Status::Won;
                info!("snake filled the board, score {}", self.score());
                TickOutcome::Won { head: next, score: self.score() }
            } else {
                debug!("ate at {}, length {}", next, self.body.len());
                TickOutcome::Ate { head: next }
            }
        } else {
            // Relocate the tail segment to the front
            self.body.rotate_right(1);
            let vacated = std::mem::replace(&mut self.body[0], next);
            TickOutcome::Moved { head: next, vacated }
        }
    }
}

fn initial_body(board: &Board, start_length: usize) -> Result<VecDeque<Cell>, GameError> {
    if start_length < START_LENGTH {
        return Err(GameError::StartLengthTooShort { length: start_length });
    }

    let does_not_fit = GameError::SnakeDoesNotFit {
        length: start_length,
        width: board.width(),
        height: board.height(),
    };
    if start_length >= board.area() {
        return Err(does_not_fit);
    }

    let body: VecDeque<Cell> = (0..start_length)
        .map(|i| i32::try_from(i).map(|i| Cell::new(-i, 0)))
        .collect::<Result<_, _>>()
        .map_err(|_| does_not_fit.clone())?;

    if body.iter().all(|cell| board.contains(*cell)) {
        Ok(body)
    } else {
        Err(does_not_fit)
    }
}
