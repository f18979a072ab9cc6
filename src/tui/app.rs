//! Application state owned by the UI loop.

use crate::coordinator::Termination;
use crate::games::minesweeper::Position;
use crate::render::{BoardView, Glyph};
use tracing::debug;

use super::input::{Direction, move_cursor};
use super::renderer::GameEvent;

/// Main application state.
pub struct App {
    view: BoardView,
    cursor: (usize, usize),
    mine_quantity: usize,
    status_message: String,
}

impl App {
    /// Creates the app around the initial look of the board.
    pub fn new(view: BoardView, mine_quantity: usize) -> Self {
        Self {
            view,
            cursor: (0, 0),
            mine_quantity,
            status_message: "Find the mines. Good luck!".to_string(),
        }
    }

    /// The board as last drawn.
    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Selected cell as `(row, col)`.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// The selected cell as a board position.
    pub fn selected(&self) -> Position {
        Position::new(self.cursor.0 as i32, self.cursor.1 as i32)
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Replaces the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Mines left to find, assuming every flag is correct.
    pub fn mines_remaining(&self) -> isize {
        let flags = (0..self.view.rows())
            .flat_map(|row| (0..self.view.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.view.get(row, col) == Some(Glyph::Flagged))
            .count();
        self.mine_quantity as isize - flags as isize
    }

    /// Moves the cursor one cell.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = move_cursor(self.cursor, direction, self.view.rows(), self.view.cols());
    }

    /// Applies a redraw forwarded by the render worker.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::BoardDrawn(view) => self.view = view,
            GameEvent::CellChanged { row, col, glyph } => self.view.set(row, col, glyph),
        }
    }

    /// Shows the end-of-session message.
    pub fn finish(&mut self, termination: Termination) {
        self.status_message = termination.message().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::minesweeper::Board;

    #[test]
    fn test_flags_reduce_remaining_mines() {
        let mut app = App::new(BoardView::of(&Board::square(3)), 2);
        assert_eq!(app.mines_remaining(), 2);
        app.handle_event(GameEvent::CellChanged {
            row: 1,
            col: 1,
            glyph: Glyph::Flagged,
        });
        assert_eq!(app.mines_remaining(), 1);
    }

    #[test]
    fn test_cursor_selection() {
        let mut app = App::new(BoardView::of(&Board::square(3)), 1);
        app.move_cursor(Direction::Down);
        app.move_cursor(Direction::Right);
        assert_eq!(app.selected(), Position::new(1, 1));
    }
}
