//! Board cells.
//!
//! The board is a fixed 13×13 grid addressed by 1-based `(row, col)` pairs.
//! A `Cell` is always on the board: every constructor is bounds-checked and
//! `offset` returns `None` instead of leaving the grid.
//!
//! ```
//! use rust_asude::core::Cell;
//!
//! let cell = Cell::new(1, 7).unwrap();
//! assert_eq!(cell.offset(1, 1), Cell::new(2, 8));
//! assert_eq!(cell.offset(-1, 0), None); // Row 0 is off the board
//! assert!(Cell::new(14, 1).is_none());
//! ```

use serde::{Deserialize, Serialize};

use super::error::RuleError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 13;

/// A cell on the board, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Create a cell, returning `None` when outside `[1, 13]²`.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if Self::in_bounds(row as i16, col as i16) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Create a cell from known-good constants.
    ///
    /// Only used for the fixed geometry tables; panics at compile time when a
    /// table entry is off the board.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        assert!(Self::in_bounds(row as i16, col as i16), "cell off the board");
        Self { row, col }
    }

    /// Create a cell from caller input, reporting the offending coordinates.
    pub fn checked(row: u8, col: u8) -> Result<Self, RuleError> {
        Self::new(row, col).ok_or(RuleError::OutOfBounds { row, col })
    }

    const fn in_bounds(row: i16, col: i16) -> bool {
        row >= 1 && row <= BOARD_SIZE as i16 && col >= 1 && col <= BOARD_SIZE as i16
    }

    /// Row, 1-based.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column, 1-based.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Apply a delta, returning a cell only when it stays on the board.
    #[must_use]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(d_row);
        let col = i16::from(self.col) + i16::from(d_col);
        if Self::in_bounds(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Diagonal distance to `other`, if the two cells share a diagonal.
    ///
    /// Returns `None` for cells that are not on a common diagonal and for
    /// the cell itself.
    #[must_use]
    pub fn diagonal_distance(self, other: Cell) -> Option<u8> {
        let d_row = self.row.abs_diff(other.row);
        let d_col = self.col.abs_diff(other.col);
        (d_row == d_col && d_row > 0).then_some(d_row)
    }

    /// Cells strictly between `self` and `other` on a shared row or column.
    ///
    /// Empty when the two cells are not orthogonally aligned or adjacent.
    pub fn orthogonal_between(self, other: Cell) -> impl Iterator<Item = Cell> {
        let aligned = self.row == other.row || self.col == other.col;
        let steps = if aligned {
            self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
        } else {
            0
        };
        let d_row = (i16::from(other.row) - i16::from(self.row)).signum() as i8;
        let d_col = (i16::from(other.col) - i16::from(self.col)).signum() as i8;
        (1..steps).filter_map(move |i| {
            let i = i as i8;
            self.offset(d_row * i, d_col * i)
        })
    }

    /// Iterate over every cell on the board, row-major.
    pub fn all() -> impl Iterator<Item = Cell> {
        (1..=BOARD_SIZE).flat_map(|row| (1..=BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Cell {
    type Error = RuleError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Self::checked(row, col)
    }
}

impl From<Cell> for (u8, u8) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}C{}", self.row, self.col)
    }
}
