//! Pieces module - tetromino shape matrices, rotation and spawning
//!
//! Every piece is a small square matrix (2x2 for O, 4x4 for I, 3x3 for the
//! rest) anchored at its top-left corner on the board. Rotation produces a new
//! matrix; shapes are never mutated in place.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest matrix side used by any piece (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// The matrix side is the number of rows (capped at 4); missing entries
    /// are empty.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len().min(MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().take(size).enumerate() {
            for (c, &v) in row.iter().take(size).enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Canonical starting orientation for a piece kind
    pub fn canonical(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            PieceKind::J => Self::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            PieceKind::T => Self::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        }
    }

    /// Matrix side length
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the sub-cell at (row, col) is occupied; false outside the matrix
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// Occupied sub-cells as (row, col) offsets from the anchor, row-major
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |r| {
            (0..n).filter_map(move |c| self.cells[r][c].then_some((r as i8, c as i8)))
        })
    }

    /// Rotate 90° clockwise: `result[i][j] = self[n-1-j][i]`
    pub fn rotated(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// Rotate a shape 90° clockwise (see [`Shape::rotated`])
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated()
}

/// Active falling piece
///
/// `row`/`col` locate the matrix's top-left corner; `row` is negative while
/// the piece is still entering from the hidden rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl Tetromino {
    /// Create a piece in its canonical orientation at the spawn position.
    ///
    /// Wide pieces are centred, 3-wide ones sit left of centre. The I piece
    /// starts one row lower than the rest since its filled row is the second
    /// row of its matrix, so every kind first appears at the same height.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::canonical(kind);
        let size = shape.size() as i8;
        let col = BOARD_WIDTH as i8 / 2 - (size + 1) / 2;
        let row = if kind == PieceKind::I { -1 } else { -2 };
        Self {
            kind,
            shape,
            row,
            col,
        }
    }

    /// Same piece shifted by (drow, dcol)
    pub fn offset(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..*self
        }
    }

    /// Same piece with its shape rotated clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Absolute (row, col) board positions of the occupied sub-cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.row + r, self.col + c))
    }
}
