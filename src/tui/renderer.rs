//! Bridges the render worker to the UI loop.

use crate::games::minesweeper::{Board, Position};
use crate::render::{BoardRenderer, BoardView, Glyph};
use tokio::sync::mpsc;
use tracing::trace;

/// Redraws sent from the render worker to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The whole board was redrawn.
    BoardDrawn(BoardView),
    /// A single cell changed.
    CellChanged {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// New look of the cell.
        glyph: Glyph,
    },
}

/// [`BoardRenderer`] that forwards redraws to the UI thread.
///
/// The channel is unbounded so the render worker never waits on the UI.
pub struct ChannelRenderer {
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelRenderer {
    /// Creates a renderer that sends to `event_tx`.
    pub fn new(event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { event_tx }
    }

    fn send(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("UI loop gone, dropping redraw");
        }
    }
}

impl BoardRenderer for ChannelRenderer {
    fn draw_board(&mut self, board: &Board) {
        self.send(GameEvent::BoardDrawn(BoardView::of(board)));
    }

    fn render_cell(&mut self, board: &Board, pos: Position) {
        let Some(cell) = board.cell(pos) else {
            return;
        };
        self.send(GameEvent::CellChanged {
            row: pos.row as usize,
            col: pos.col as usize,
            glyph: Glyph::of(cell),
        });
    }
}
