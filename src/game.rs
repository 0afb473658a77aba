use std::{thread::sleep, time::{Duration, Instant}};

use color_eyre::eyre::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use grid_snake::{Board, Cell, GameConfig, GameSession, Presentation, Sound};

use crate::term::{Coords, TermInt, TermManager};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';

/// Draws game effects into the terminal. Board cells map one to one onto
/// terminal cells inside a one-character border, with `+y` pointing up.
pub struct TermView {
    term: TermManager,
    board: Board,
    food: Option<Cell>,
    failed: Option<crossterm::ErrorKind>,
}

impl TermView {
    fn new(term: TermManager, board: Board) -> Self {
        TermView { term, board, food: None, failed: None }
    }

    fn to_coords(&self, cell: Cell) -> Option<Coords> {
        if !self.board.contains(cell) {
            return None;
        }
        let col = cell.x - self.board.min_x() + 1;
        let row = self.board.max_y() - 1 - cell.y + 1;
        Some((col as TermInt, row as TermInt))
    }

    fn draw(&mut self, cell: Cell, ch: char) {
        if let Some(pos) = self.to_coords(cell) {
            let res = self.term.print_at(pos, ch).and_then(|_| self.term.flush());
            self.record(res);
        }
    }

    /// Effects are fire-and-forget, so the first terminal error is kept
    /// and raised by the game loop.
    fn record(&mut self, res: crossterm::Result<()>) {
        if let Err(err) = res {
            if self.failed.is_none() {
                self.failed = Some(err);
            }
        }
    }

    fn take_failure(&mut self) -> Result<()> {
        match self.failed.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

impl Presentation for TermView {
    fn spawn_segment(&mut self, cell: Cell) {
        self.draw(cell, SNAKE_BODY_CHAR);
    }

    fn destroy_segment(&mut self, cell: Cell) {
        self.draw(cell, ' ');
    }

    fn spawn_food(&mut self, cell: Cell) {
        self.food = Some(cell);
        self.draw(cell, FOOD_CHAR);
    }

    fn clear_food(&mut self) {
        if let Some(cell) = self.food.take() {
            self.draw(cell, ' ');
        }
    }

    fn play(&mut self, sound: Sound) {
        debug!("sound: {:?}", sound);
        if matches!(sound, Sound::Death | Sound::Win) {
            let res = self.term.bell().and_then(|_| self.term.flush());
            self.record(res);
        }
    }

    fn show_text(&mut self, text: &str) {
        let mut lines: Vec<&str> = text.lines().collect();
        lines.extend(["", "Press any key to play again,", "or CTRL+C to quit."]);
        let res = self.term.show_message(&lines);
        self.record(res);
    }

    fn hide_text(&mut self) {
        let res = self.term.hide_message();
        self.record(res);
    }
}

pub struct SnakeGame {
    session: GameSession,
    view: TermView,
    paused: bool,
}

impl SnakeGame {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let session = GameSession::new(config)?;
        let term = TermManager::new()?;

        let board = *session.board();
        let (term_w, term_h) = term.get_terminal_size();
        if board.width() + 2 > term_w as i32 || board.height() + 2 > term_h as i32 {
            bail!(
                "terminal is {}x{}, a {}x{} board needs at least {}x{}",
                term_w,
                term_h,
                board.width(),
                board.height(),
                board.width() + 2,
                board.height() + 2
            );
        }

        Ok(SnakeGame { session, view: TermView::new(term, board), paused: false })
    }

    /// Runs until the player quits, leaving the terminal as it was found.
    pub fn run(&mut self) -> Result<()> {
        self.view.term.setup()?;
        let res = self.show_intro().and_then(|quit| if quit { Ok(()) } else { self.play() });
        self.view.term.restore()?;
        res
    }

    /// Returns whether the player asked to quit.
    fn show_intro(&mut self) -> Result<bool> {
        self.view.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let quit = is_ctrl_c(&self.view.term.read_key_blocking()?);
        self.view.term.hide_message()?;
        Ok(quit)
    }

    fn play(&mut self) -> Result<()> {
        loop {
            self.start_round()?;

            if !self.round()? {
                return Ok(());
            }

            // Quit if the user CTRL+C's after the game
            if is_ctrl_c(&self.view.term.read_key_blocking()?) {
                return Ok(());
            }
        }
    }

    fn start_round(&mut self) -> Result<()> {
        self.view.term.clear()?;
        let board = self.view.board;
        self.view.term.draw_borders(((board.width() + 2) as TermInt, (board.height() + 2) as TermInt))?;
        self.session.init(&mut self.view);
        self.session.start_clock(Instant::now());
        self.view.take_failure()
    }

    /// Plays until the snake dies or wins. Returns `false` if the player quit.
    fn round(&mut self) -> Result<bool> {
        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.view.term.read_key_events_queue()? {
                if is_ctrl_c(&key_ev) {
                    return Ok(false);
                }
                if key_ev.code == KeyCode::Esc {
                    self.toggle_pause()?;
                } else if !self.paused {
                    if let Some(symbol) = key_symbol(&key_ev) {
                        self.session.propose_heading(&symbol);
                    }
                }
            }

            if self.paused {
                continue;
            }

            let outcome = self.session.poll(Instant::now(), &mut self.view);
            self.view.take_failure()?;

            if let Some(outcome) = outcome {
                if outcome.is_terminal() {
                    return Ok(true);
                }
            }
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.view.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.view.term.hide_message()?;
            // Don't count the pause towards the next tick
            self.session.start_clock(Instant::now());
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Maps a key press to the symbol the game understands.
pub fn key_symbol(ev: &KeyEvent) -> Option<String> {
    let symbol = match ev.code {
        KeyCode::Up => "UpArrow".to_owned(),
        KeyCode::Down => "DownArrow".to_owned(),
        KeyCode::Left => "LeftArrow".to_owned(),
        KeyCode::Right => "RightArrow".to_owned(),
        KeyCode::Char(c) => c.to_string(),
        other => {
            debug!("ignoring key {:?}", other);
            return None;
        }
    };
    Some(symbol)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
