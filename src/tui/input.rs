//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the selection cursor.
    Move(Direction),
    /// Reveal the selected cell.
    Reveal,
    /// Toggle the flag on the selected cell.
    ToggleFlag,
    /// End the session.
    Quit,
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous row.
    Up,
    /// Next row.
    Down,
    /// Previous column.
    Left,
    /// Next column.
    Right,
}

/// Maps a key to an action, or `None` for unbound keys.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Move(Direction::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Reveal),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleFlag),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Moves the cursor one step, stopping at the board edges.
pub fn move_cursor(
    (row, col): (usize, usize),
    direction: Direction,
    rows: usize,
    cols: usize,
) -> (usize, usize) {
    match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => ((row + 1).min(rows.saturating_sub(1)), col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, (col + 1).min(cols.saturating_sub(1))),
    }
}
