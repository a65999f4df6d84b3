//! Board module - manages the game grid
//!
//! The board is a 10x20 visible grid plus two hidden rows above it where
//! pieces spawn. Each cell is empty or holds the kind of the piece that locked
//! there. Uses a flat array for cache locality and zero allocation.
//!
//! Coordinates are (row, col): row runs -2..20 top to bottom (negative rows are
//! hidden), col runs 0..10 left to right.

use crate::pieces::{Shape, Tetromino};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Rows actually stored, hidden ones included
const STORAGE_ROWS: usize = (HIDDEN_ROWS + BOARD_HEIGHT) as usize;

/// Total number of stored cells
const BOARD_SIZE: usize = STORAGE_ROWS * BOARD_WIDTH as usize;

/// Outcome of writing a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Placement {
    /// Every cell of the piece was written
    Locked,
    /// Part of the piece was still above row 0; nothing was written
    OffScreen,
}

/// The game board - 10 columns x (2 hidden + 20 visible) rows, flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Row-major cells, storage row 0 is board row -2
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col), None outside the stored grid
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        let storage_row = row as i16 + HIDDEN_ROWS as i16;
        if col < 0 || col >= BOARD_WIDTH as i8 || storage_row < 0 || storage_row >= STORAGE_ROWS as i16
        {
            return None;
        }
        Some(storage_row as usize * BOARD_WIDTH as usize + col as usize)
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get visible height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a visible row is completely filled
    pub fn is_row_full(&self, row: i8) -> bool {
        if row < 0 || row >= BOARD_HEIGHT as i8 {
            return false;
        }
        (0..BOARD_WIDTH as i8).all(|col| self.is_occupied(row, col))
    }

    /// Whether `shape` anchored at (row, col) fits on the board.
    ///
    /// Occupied sub-cells must stay within the side walls and above the floor,
    /// and must not overlap a filled cell. Sub-cells still above row 0 are
    /// only checked against the walls.
    pub fn is_valid_move(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape.cells().all(|(r, c)| {
            let cell_row = row as i16 + r as i16;
            let cell_col = col as i16 + c as i16;
            if cell_col < 0 || cell_col >= BOARD_WIDTH as i16 || cell_row >= BOARD_HEIGHT as i16 {
                return false;
            }
            cell_row < 0 || !self.is_occupied(cell_row as i8, cell_col as i8)
        })
    }

    /// [`Board::is_valid_move`] for a piece at its own position
    pub fn fits(&self, piece: &Tetromino) -> bool {
        self.is_valid_move(&piece.shape, piece.row, piece.col)
    }

    /// Write the piece's kind into every cell it covers.
    ///
    /// A piece locked while any part is still above row 0 is not written at
    /// all and reports [`Placement::OffScreen`].
    pub fn place(&mut self, piece: &Tetromino) -> Placement {
        if piece.cells().any(|(row, _)| row < 0) {
            return Placement::OffScreen;
        }

        for (row, col) in piece.cells() {
            self.set(row, col, Some(piece.kind));
        }

        Placement::Locked
    }

    /// Remove one row and shift everything above it down by one.
    /// The topmost hidden row comes back empty.
    fn collapse_row(&mut self, row: i8) {
        let width = BOARD_WIDTH as usize;
        let storage_row = (row as i16 + HIDDEN_ROWS as i16) as usize;

        // copy_within handles overlapping ranges safely
        for r in (1..=storage_row).rev() {
            let src_start = (r - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, r * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans from the bottom up. After a clear the same row index is examined
    /// again, since the row above has just moved into it; this handles several
    /// full rows, adjacent or not, in one pass.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT as i8 - 1;

        while row >= 0 {
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// True when no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Write the visible rows as piece codes (0 = empty) into `out`
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (row, line) in out.iter_mut().enumerate() {
            for (col, slot) in line.iter_mut().enumerate() {
                *slot = self
                    .get(row as i8, col as i8)
                    .flatten()
                    .map_or(0, |kind| kind.code());
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
