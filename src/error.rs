use crate::direction::{Cell, Direction};
use crate::GridInt;

/// Errors raised while building a board or a snake. Gameplay itself
/// (ticks, input, food placement) never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: GridInt, height: GridInt },

    #[error("start length {length} is too short, the snake needs at least 2 segments")]
    StartLengthTooShort { length: usize },

    #[error("a snake of length {length} does not fit on a {width}x{height} board")]
    SnakeDoesNotFit {
        length: usize,
        width: GridInt,
        height: GridInt,
    },

    #[error("snake body has {length} segments, at least 2 are required")]
    BodyTooShort { length: usize },

    #[error("snake segments {index} and {next} are not adjacent", next = .index + 1)]
    DisconnectedBody { index: usize },

    #[error("snake body occupies {0} more than once")]
    OverlappingBody(Cell),

    #[error("heading {heading} reverses the snake's current direction")]
    ReversedHeading { heading: Direction },

    #[error("snake segment {0} lies outside the board")]
    SnakeOffBoard(Cell),

    #[error("food at {0} lies outside the board")]
    FoodOffBoard(Cell),

    #[error("food at {0} lies on the snake")]
    FoodOnSnake(Cell),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GameError::SnakeDoesNotFit {
            length: 9,
            width: 3,
            height: 3,
        };
        assert_eq!(err.to_string(), "a snake of length 9 does not fit on a 3x3 board");

        let err = GameError::DisconnectedBody { index: 2 };
        assert_eq!(err.to_string(), "snake segments 2 and 3 are not adjacent");

        let err = GameError::OverlappingBody(Cell::new(1, -1));
        assert_eq!(err.to_string(), "snake body occupies (1, -1) more than once");

        let err = GameError::FoodOnSnake(Cell::new(0, 1));
        assert_eq!(err.to_string(), "food at (0, 1) lies on the snake");
    }
}
