use crate::direction::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Eat,
    Death,
    Win,
}

/// Host-side effects triggered by the game. Every call is fire-and-forget.
pub trait Presentation {
    fn spawn_segment(&mut self, cell: Cell);

    fn destroy_segment(&mut self, cell: Cell);

    /// The tail segment at `from` becomes the new head at `to`.
    fn move_segment(&mut self, from: Cell, to: Cell) {
        self.destroy_segment(from);
        self.spawn_segment(to);
    }

    fn spawn_food(&mut self, cell: Cell);

    fn clear_food(&mut self);

    fn play(&mut self, sound: Sound);

    fn show_text(&mut self, text: &str);

    fn hide_text(&mut self);
}

/// Headless presenter.
impl Presentation for () {
    fn spawn_segment(&mut self, _cell: Cell) {}
    fn destroy_segment(&mut self, _cell: Cell) {}
    fn spawn_food(&mut self, _cell: Cell) {}
    fn clear_food(&mut self) {}
    fn play(&mut self, _sound: Sound) {}
    fn show_text(&mut self, _text: &str) {}
    fn hide_text(&mut self) {}
}

pub fn game_over_text(score: usize) -> String {
    format!("Game Over\nScore: {}", score)
}

pub fn win_text(score: usize) -> String {
    format!("You Win!\nScore: {}", score)
}
