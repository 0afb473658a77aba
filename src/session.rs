use std::time::{Duration, Instant};

use log::{debug, error};
use rand::{rngs::StdRng, SeedableRng};

use crate::board::Board;
use crate::config::GameConfig;
use crate::direction::{Cell, Direction};
use crate::effects::{game_over_text, win_text, Presentation, Sound};
use crate::error::GameError;
use crate::occupancy::Playfield;
use crate::snake::{SnakeState, TickOutcome};

/// One game: a board, the snake on it, the food and the tick clock.
pub struct GameSession {
    board: Board,
    snake: SnakeState,
    field: Playfield,
    start_length: usize,
    rng: StdRng,
    tick_interval: Duration,
    last_move: Option<Instant>,
}

impl GameSession {
    /// Sets up a game ready to play. No effects are emitted; call
    /// [`GameSession::init`] with a presenter to draw the opening position.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let board = config.board();
        let snake = SnakeState::new(&board, config.start_length)?;
        let field = Playfield::new(board, &snake);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = GameSession {
            board,
            snake,
            field,
            start_length: config.start_length,
            rng,
            tick_interval: config.tick_interval(),
            last_move: None,
        };
        session.place_food();
        Ok(session)
    }

    /// Resumes from a staged snake. Food is placed at `food` if given,
    /// otherwise randomly. The snake and food must lie on the board, the
    /// food off the snake, and the snake's start length must allow a reset.
    pub fn with_snake(config: &GameConfig, snake: SnakeState, food: Option<Cell>) -> Result<Self, GameError> {
        let mut session = Self::new(config)?;
        let board = session.board;

        if let Some(cell) = snake.body().iter().find(|cell| !board.contains(**cell)) {
            return Err(GameError::SnakeOffBoard(*cell));
        }
        SnakeState::new(&board, snake.start_length())?;
        if let Some(cell) = food {
            if !board.contains(cell) {
                return Err(GameError::FoodOffBoard(cell));
            }
            if snake.body().contains(&cell) {
                return Err(GameError::FoodOnSnake(cell));
            }
        }

        session.start_length = snake.start_length();
        session.field.sync(&snake);
        session.snake = snake;
        match food {
            Some(cell) => session.field.set_food(Some(cell)),
            None => {
                session.place_food();
            }
        }
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &SnakeState {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.field.food()
    }

    pub fn score(&self) -> usize {
        self.snake.score()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Restarts the game: old segments and food are removed, a fresh snake
    /// and a new food item are spawned.
    pub fn init(&mut self, fx: &mut impl Presentation) {
        let previous: Vec<Cell> = self.snake.body().iter().copied().collect();

        // start_length was validated against this board when the session was built
        if let Err(err) = self.snake.init(&self.board, self.start_length) {
            error!("failed to reset snake: {}", err);
            return;
        }

        for cell in previous {
            fx.destroy_segment(cell);
        }
        fx.hide_text();
        fx.clear_food();
        self.field.sync(&self.snake);
        self.field.set_food(None);
        self.last_move = None;

        for cell in self.snake.body() {
            fx.spawn_segment(*cell);
        }
        if let Some(food) = self.place_food() {
            fx.spawn_food(food);
        }
        debug!("game initialised on a {}x{} board", self.board.width(), self.board.height());
    }

    pub fn propose_heading(&mut self, symbol: &str) -> Direction {
        self.snake.propose_heading(symbol)
    }

    pub fn steer(&mut self, direction: Direction) -> Direction {
        self.snake.steer(direction)
    }

    /// Runs a single tick and emits its effects.
    pub fn tick(&mut self, fx: &mut impl Presentation) -> TickOutcome {
        let outcome = self.snake.tick(&self.board, &self.field);
        self.field.apply(outcome);

        match outcome {
            TickOutcome::Moved { head, vacated } => fx.move_segment(vacated, head),
            TickOutcome::Ate { head } => {
                fx.spawn_segment(head);
                fx.play(Sound::Eat);
                if let Some(food) = self.place_food() {
                    fx.spawn_food(food);
                }
            }
            TickOutcome::Won { head, score } => {
                fx.spawn_segment(head);
                fx.clear_food();
                fx.play(Sound::Win);
                fx.show_text(&win_text(score));
            }
            TickOutcome::Died { score } => {
                fx.play(Sound::Death);
                fx.show_text(&game_over_text(score));
            }
            TickOutcome::Idle => {}
        }

        outcome
    }

    /// Whether more than one tick interval has passed since the last move.
    pub fn tick_due(&self, now: Instant) -> bool {
        match self.last_move {
            Some(last) => now.saturating_duration_since(last) > self.tick_interval,
            None => true,
        }
    }

    /// Ticks if one is due at `now`.
    pub fn poll(&mut self, now: Instant, fx: &mut impl Presentation) -> Option<TickOutcome> {
        if !self.tick_due(now) {
            return None;
        }
        self.last_move = Some(now);
        Some(self.tick(fx))
    }

    /// Starts the tick clock at `now` without moving.
    pub fn start_clock(&mut self, now: Instant) {
        self.last_move = Some(now);
    }

    fn place_food(&mut self) -> Option<Cell> {
        let food = self.board.place_food(self.field.segments(), &mut self.rng);
        self.field.set_food(food);
        food
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        segments: Vec<Cell>,
        food: Option<Cell>,
        sounds: Vec<Sound>,
        text: Option<String>,
    }

    impl Presentation for Recorder {
        fn spawn_segment(&mut self, cell: Cell) {
            self.segments.push(cell);
        }
        fn destroy_segment(&mut self, cell: Cell) {
            self.segments.retain(|c| *c != cell);
        }
        fn spawn_food(&mut self, cell: Cell) {
            self.food = Some(cell);
        }
        fn clear_food(&mut self) {
            self.food = None;
        }
        fn play(&mut self, sound: Sound) {
            self.sounds.push(sound);
        }
        fn show_text(&mut self, text: &str) {
            self.text = Some(text.to_owned());
        }
        fn hide_text(&mut self) {
            self.text = None;
        }
    }

    fn session(seed: u64) -> GameSession {
        GameSession::new(&GameConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_new_places_food_off_snake() {
        for seed in 0..50 {
            let session = session(seed);
            let food = session.food().unwrap();
            assert!(session.board().contains(food));
            assert!(!session.snake().body().contains(&food));
        }
    }

    #[test]
    fn test_init_spawns_everything() {
        let mut session = session(1);
        let mut fx = Recorder::default();
        session.init(&mut fx);

        assert_eq!(fx.segments, vec![Cell::new(0, 0), Cell::new(-1, 0)]);
        assert_eq!(fx.food, session.food());
        assert!(fx.text.is_none());
    }

    #[test]
    fn test_eating_respawns_food() {
        let config = GameConfig::default().with_seed(5);
        let snake = SnakeState::from_parts([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right, 2).unwrap();
        let mut session = GameSession::with_snake(&config, snake, Some(Cell::new(2, 0))).unwrap();
        let mut fx = Recorder::default();

        assert_eq!(session.tick(&mut fx), TickOutcome::Ate { head: Cell::new(2, 0) });
        assert_eq!(session.score(), 1);
        assert_eq!(fx.sounds, vec![Sound::Eat]);

        let food = session.food().unwrap();
        assert_eq!(fx.food, Some(food));
        assert!(!session.snake().body().contains(&food));
    }

    #[test]
    fn test_death_shows_score() {
        let config = GameConfig::default().with_seed(5);
        let snake =
            SnakeState::from_parts([Cell::new(7, 1), Cell::new(7, 0), Cell::new(6, 0)], Direction::Right, 2).unwrap();
        let mut session = GameSession::with_snake(&config, snake, Some(Cell::new(-5, -5))).unwrap();
        let mut fx = Recorder::default();

        assert_eq!(session.tick(&mut fx), TickOutcome::Died { score: 1 });
        assert_eq!(fx.sounds, vec![Sound::Death]);
        assert_eq!(fx.text.as_deref(), Some("Game Over\nScore: 1"));

        assert_eq!(session.tick(&mut fx), TickOutcome::Idle);
        assert_eq!(fx.sounds.len(), 1);
    }

    #[test]
    fn test_init_after_death_restarts() {
        let config = GameConfig::default().with_seed(9);
        let snake = SnakeState::from_parts([Cell::new(7, 0), Cell::new(6, 0)], Direction::Right, 2).unwrap();
        let mut session = GameSession::with_snake(&config, snake, None).unwrap();
        let mut fx = Recorder::default();

        session.tick(&mut fx);
        assert!(session.snake().is_dead());

        session.init(&mut fx);
        assert!(session.snake().is_alive());
        assert!(fx.text.is_none());
        assert_eq!(session.snake().head(), Cell::new(0, 0));
        assert!(matches!(session.tick(&mut fx), TickOutcome::Moved { .. } | TickOutcome::Ate { .. }));
    }

    #[test]
    fn test_with_snake_rejects_bad_food() {
        let config = GameConfig::default().with_seed(3);
        let staged = || {
            SnakeState::from_parts(
                [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)],
                Direction::Up,
                2,
            )
            .unwrap()
        };

        let err = GameSession::with_snake(&config, staged(), Some(Cell::new(0, 1))).err();
        assert_eq!(err, Some(GameError::FoodOnSnake(Cell::new(0, 1))));

        let err = GameSession::with_snake(&config, staged(), Some(Cell::new(0, 5))).err();
        assert_eq!(err, Some(GameError::FoodOffBoard(Cell::new(0, 5))));

        let mut session = GameSession::with_snake(&config, staged(), None).unwrap();
        assert_eq!(session.tick(&mut ()), TickOutcome::Died { score: 2 });
    }

    #[test]
    fn test_with_snake_rejects_off_board_snake() {
        let config = GameConfig::default().with_seed(3);
        let snake = SnakeState::from_parts([Cell::new(8, 0), Cell::new(7, 0)], Direction::Right, 2).unwrap();
        let err = GameSession::with_snake(&config, snake, None).err();
        assert_eq!(err, Some(GameError::SnakeOffBoard(Cell::new(8, 0))));
    }

    #[test]
    fn test_with_snake_rejects_start_length_that_cannot_reset() {
        let config = GameConfig::default().with_seed(3);
        let snake = SnakeState::from_parts([Cell::new(7, 0), Cell::new(6, 0)], Direction::Right, 9).unwrap();
        let err = GameSession::with_snake(&config, snake, None).err();
        assert!(matches!(err, Some(GameError::SnakeDoesNotFit { length: 9, .. })));
    }

    #[test]
    fn test_restart_uses_staged_start_length() {
        let config = GameConfig::default().with_seed(8);
        let snake =
            SnakeState::from_parts([Cell::new(7, 1), Cell::new(7, 0), Cell::new(6, 0)], Direction::Right, 3).unwrap();
        let mut session = GameSession::with_snake(&config, snake, None).unwrap();
        let mut fx = Recorder::default();

        assert_eq!(session.tick(&mut fx), TickOutcome::Died { score: 0 });
        session.init(&mut fx);
        assert!(session.snake().is_alive());
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(fx.segments, vec![Cell::new(0, 0), Cell::new(-1, 0), Cell::new(-2, 0)]);
    }

    #[test]
    fn test_poll_respects_interval() {
        let mut session = session(2);
        let start = Instant::now();
        session.start_clock(start);

        assert!(session.poll(start, &mut ()).is_none());
        assert!(session.poll(start + session.tick_interval(), &mut ()).is_none());

        let later = start + session.tick_interval() + Duration::from_millis(1);
        assert!(session.poll(later, &mut ()).is_some());
        assert!(!session.tick_due(later));
    }
}
