//! Rule engine for a grid-based snake game.
//!
//! The crate tracks the snake, interprets directional input, advances the
//! snake one cell per tick and reports outcomes. Rendering, audio and input
//! polling stay with the host and are reached through the
//! [`Presentation`](effects::Presentation) and
//! [`OccupancyOracle`](occupancy::OccupancyOracle) traits.

pub mod board;
pub mod config;
pub mod direction;
pub mod effects;
pub mod error;
pub mod occupancy;
pub mod session;
pub mod snake;

pub use board::Board;
pub use config::GameConfig;
pub use direction::{Cell, Direction};
pub use effects::{Presentation, Sound};
pub use error::GameError;
pub use occupancy::{Occupant, OccupancyOracle, Playfield};
pub use session::GameSession;
pub use snake::{SnakeState, Status, TickOutcome, START_LENGTH};

pub type GridInt = i32;
