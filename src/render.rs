//! Rendering seam between the coordinator and whatever draws the board.

use crate::games::minesweeper::{Board, Cell, Position};

/// Receives board redraw requests from the coordinator's render worker.
///
/// Both methods get a snapshot taken under the board lock and released
/// before the call, so implementations never hold up reveals. Implementations
/// that drive a terminal should marshal the work onto the UI thread rather
/// than drawing from the worker.
pub trait BoardRenderer: Send + 'static {
    /// Redraws the whole board.
    fn draw_board(&mut self, board: &Board);

    /// Redraws the single cell at `pos`.
    fn render_cell(&mut self, board: &Board, pos: Position);
}

/// What a cell looks like to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Glyph {
    /// Not yet revealed.
    #[default]
    Hidden,
    /// Hidden and flagged.
    Flagged,
    /// A revealed mine.
    Mine,
    /// A revealed safe cell with its adjacent mine count.
    Count(u8),
}

impl Glyph {
    /// Derives the glyph for a cell. Shown state takes priority over a flag.
    pub fn of(cell: &Cell) -> Self {
        if cell.is_shown() {
            if cell.is_mine() {
                Glyph::Mine
            } else {
                Glyph::Count(cell.nearby_mines())
            }
        } else if cell.is_flagged() {
            Glyph::Flagged
        } else {
            Glyph::Hidden
        }
    }

    /// Single-character symbol used in the terminal.
    pub fn symbol(self) -> char {
        match self {
            Glyph::Hidden => '.',
            Glyph::Flagged => 'F',
            Glyph::Mine => 'M',
            Glyph::Count(n) => char::from_digit(u32::from(n), 10).unwrap_or('?'),
        }
    }
}

/// Row-major grid of glyphs mirroring a board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    rows: usize,
    cols: usize,
    glyphs: Vec<Glyph>,
}

impl BoardView {
    /// Captures the current look of every cell.
    pub fn of(board: &Board) -> Self {
        Self {
            rows: board.rows(),
            cols: board.cols(),
            glyphs: board.cells().map(Glyph::of).collect(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Glyph at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<Glyph> {
        (row < self.rows && col < self.cols)
            .then(|| self.glyphs[row * self.cols + col])
    }

    /// Replaces a single glyph; out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, glyph: Glyph) {
        if row < self.rows && col < self.cols {
            self.glyphs[row * self.cols + col] = glyph;
        }
    }

    /// Renders the view as text, one line per row.
    pub fn display(&self) -> String {
        self.glyphs
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|g| g.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
