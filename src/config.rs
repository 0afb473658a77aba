use std::time::Duration;

use log::warn;

use crate::board::Board;
use crate::snake::START_LENGTH;

/// Ticks per second.
pub const DEFAULT_SPEED: f64 = 4.0;

/// Configuration for a game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Board width as free text, resolved with a fallback of 15
    pub width: Option<String>,
    /// Board height as free text, resolved with a fallback of 10
    pub height: Option<String>,
    /// Ticks per second
    pub speed: f64,
    /// Initial length of the snake
    pub start_length: usize,
    /// Seed for food placement, random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            speed: DEFAULT_SPEED,
            start_length: START_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a board of the given size
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: Some(width.into()),
            height: Some(height.into()),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn board(&self) -> Board {
        Board::from_raw(self.width.as_deref(), self.height.as_deref())
    }

    /// Time between two ticks, `1 / speed` seconds.
    pub fn tick_interval(&self) -> Duration {
        let speed = if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            warn!("speed {} is not a positive number, using {}", self.speed, DEFAULT_SPEED);
            DEFAULT_SPEED
        };
        Duration::try_from_secs_f64(1.0 / speed).unwrap_or_else(|_| {
            warn!("speed {} is too slow, using {}", speed, DEFAULT_SPEED);
            Duration::from_secs_f64(1.0 / DEFAULT_SPEED)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        let board = config.board();
        assert_eq!((board.width(), board.height()), (15, 10));
        assert_eq!(config.start_length, 2);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_custom_board() {
        let board = GameConfig::new("20", "12").board();
        assert_eq!((board.width(), board.height()), (20, 12));

        let board = GameConfig::new("wide", "12").board();
        assert_eq!((board.width(), board.height()), (15, 12));
    }

    #[test]
    fn test_bad_speed_falls_back() {
        let mut config = GameConfig::default();
        config.speed = 0.0;
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        config.speed = f64::NAN;
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        config.speed = 1e-30;
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        config.speed = 2.0;
        assert_eq!(config.tick_interval(), Duration::from_millis(500));
    }
}
