use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the 4×4 board.
///
/// A `Cell` can hold any coordinates so that out-of-range placements can be
/// reported as errors; use [`Cell::is_valid`] to check that it lies on the
/// board.
///
/// Layout (row, col):
///
/// ```text
///   (0,0) (0,1) (0,2) (0,3)
///   (1,0) (1,1) (1,2) (1,3)
///   (2,0) (2,1) (2,2) (2,3)
///   (3,0) (3,1) (3,2) (3,3)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// Board side length (4).
    pub const SIZE: usize = 4;

    /// Number of cells on the board (16).
    pub const COUNT: usize = Self::SIZE * Self::SIZE;

    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns `true` if the cell lies inside the 4×4 grid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.row < Self::SIZE && self.col < Self::SIZE
    }

    /// Row-major index in `0..16`, or `None` if the cell is off the board.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.row * Self::SIZE + self.col)
        } else {
            None
        }
    }

    /// Inverse of [`Cell::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::new(index / Self::SIZE, index % Self::SIZE)
    }

    /// Returns `true` if the cell lies on the main (top-left to bottom-right) diagonal.
    #[must_use]
    pub const fn is_on_main_diagonal(self) -> bool {
        self.row == self.col
    }

    /// Returns `true` if the cell lies on the anti (top-right to bottom-left) diagonal.
    #[must_use]
    pub const fn is_on_anti_diagonal(self) -> bool {
        self.row + self.col == Self::SIZE - 1
    }

    /// Iterates over all 16 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cells_row_major() {
        let cells: Vec<Cell> = Cell::all().collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[4], Cell::new(1, 0));
        assert_eq!(cells[15], Cell::new(3, 3));
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index(), Some(i));
        }
    }

    #[test]
    fn test_validity() {
        assert!(Cell::new(3, 3).is_valid());
        assert!(!Cell::new(4, 0).is_valid());
        assert!(!Cell::new(0, 4).is_valid());
        assert_eq!(Cell::new(4, 0).index(), None);
    }

    #[test]
    fn test_diagonal_membership() {
        assert!(Cell::new(2, 2).is_on_main_diagonal());
        assert!(!Cell::new(2, 2).is_on_anti_diagonal());
        assert!(Cell::new(0, 3).is_on_anti_diagonal());
        assert!(Cell::new(1, 2).is_on_anti_diagonal());
        assert!(!Cell::new(1, 3).is_on_main_diagonal());
        assert!(!Cell::new(1, 3).is_on_anti_diagonal());
    }
}
