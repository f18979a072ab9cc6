//! Minefield grid and mine placement.

use super::types::{Cell, Position};
use rand::Rng;
use tracing::{debug, instrument};

/// Rows × cols grid of cells in row-major order.
///
/// Once mines are placed the set of mine positions never changes for the
/// lifetime of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of hidden, mine-free cells.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    /// Creates a `size` × `size` board.
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maps a position to its storage index, or `None` if it lies off the board.
    pub fn index(&self, pos: Position) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Whether both coordinates fall inside `[0, rows)` and `[0, cols)`.
    pub fn is_valid(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Returns the cell at `pos`, if it is on the board.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(|idx| &mut self.cells[idx])
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Number of mined cells.
    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_mine).count()
    }

    /// Number of shown cells.
    pub fn shown_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_shown).count()
    }

    /// Places `quantity` mines uniformly at random.
    ///
    /// Every coordinate is listed, the list is shuffled with Fisher–Yates
    /// (walking from the last index down, swapping with a uniform index in
    /// `[0, i]`) and the first `quantity` entries become mines. Quantities
    /// larger than the board are clamped to the cell count.
    #[instrument(skip(self, rng), fields(rows = self.rows, cols = self.cols))]
    pub fn place_mines_randomly<R: Rng>(&mut self, quantity: usize, rng: &mut R) {
        let mut coords: Vec<Position> = self.positions().collect();

        for i in (1..coords.len()).rev() {
            let j = rng.random_range(0..=i);
            coords.swap(i, j);
        }

        for pos in coords.into_iter().take(quantity) {
            if let Some(cell) = self.cell_mut(pos) {
                cell.is_mine = true;
            }
        }

        debug!(mines = self.mine_count(), "Mines placed");
    }

    /// Places mines at exactly the given positions, ignoring any off the board.
    pub fn place_mines_at(&mut self, mines: &[Position]) {
        for &pos in mines {
            if let Some(cell) = self.cell_mut(pos) {
                cell.is_mine = true;
            }
        }
    }

    /// Builds a square board with mines at the given positions.
    pub fn with_mines(size: usize, mines: &[Position]) -> Self {
        let mut board = Self::square(size);
        board.place_mines_at(mines);
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_board_is_zeroed() {
        let board = Board::square(4);
        assert_eq!(board.len(), 16);
        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.shown_count(), 0);
    }

    #[test]
    fn test_index_rejects_out_of_bounds() {
        let board = Board::new(3, 5);
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(2, 4)), Some(14));
        assert_eq!(board.index(Position::new(3, 0)), None);
        assert_eq!(board.index(Position::new(0, 5)), None);
        assert_eq!(board.index(Position::new(-1, 0)), None);
        assert_eq!(board.index(Position::new(0, -1)), None);
    }

    #[test]
    fn test_positions_are_row_major() {
        let board = Board::new(2, 3);
        let positions: Vec<_> = board.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[3], Position::new(1, 0));
        for (idx, pos) in positions.into_iter().enumerate() {
            assert_eq!(board.index(pos), Some(idx));
        }
    }

    #[test]
    fn test_place_mines_randomly_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 1..=6 {
            for quantity in 0..size * size {
                let mut board = Board::square(size);
                board.place_mines_randomly(quantity, &mut rng);
                assert_eq!(board.mine_count(), quantity, "size {size}, quantity {quantity}");
            }
        }
    }

    #[test]
    fn test_place_mines_randomly_clamps_to_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::square(2);
        board.place_mines_randomly(10, &mut rng);
        assert_eq!(board.mine_count(), 4);
    }

    #[test]
    fn test_different_seeds_give_different_layouts() {
        let mut a = Board::square(9);
        let mut b = Board::square(9);
        a.place_mines_randomly(10, &mut StdRng::seed_from_u64(1));
        b.place_mines_randomly(10, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_every_cell_can_receive_a_mine() {
        let mut hits = vec![0usize; 9];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..600 {
            let mut board = Board::square(3);
            board.place_mines_randomly(1, &mut rng);
            for (idx, cell) in board.cells().enumerate() {
                if cell.is_mine() {
                    hits[idx] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&h| h > 20), "skewed placement: {hits:?}");
    }
}
