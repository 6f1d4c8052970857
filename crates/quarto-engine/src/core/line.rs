use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    cell::Cell,
    piece::{Attribute, GamePiece},
};

/// Orientation of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum LineKind {
    /// A row.
    #[display("horizontal")]
    Horizontal,
    /// A column.
    #[display("vertical")]
    Vertical,
    /// One of the two main diagonals.
    #[display("diagonal")]
    Diagonal,
}

/// Identifier of one of the 10 lines that can produce a win.
///
/// ```text
/// 0..4  rows 0-3
/// 4..8  columns 0-3
/// 8     main diagonal (r == c)
/// 9     anti diagonal (r + c == 3)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u8);

impl LineId {
    /// Number of lines (10).
    pub const COUNT: usize = 10;

    pub const MAIN_DIAGONAL: Self = Self(8);
    pub const ANTI_DIAGONAL: Self = Self(9);

    /// Line of the given row. `row` must be in `0..4`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn row(row: usize) -> Self {
        assert!(row < Cell::SIZE);
        Self(row as u8)
    }

    /// Line of the given column. `col` must be in `0..4`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn column(col: usize) -> Self {
        assert!(col < Cell::SIZE);
        Self((Cell::SIZE + col) as u8)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..).take(Self::COUNT).map(Self)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn kind(self) -> LineKind {
        match self.0 {
            0..4 => LineKind::Horizontal,
            4..8 => LineKind::Vertical,
            _ => LineKind::Diagonal,
        }
    }

    /// Returns the four cells of this line.
    #[must_use]
    pub fn cells(self) -> [Cell; Cell::SIZE] {
        let i = self.index();
        match self.kind() {
            LineKind::Horizontal => std::array::from_fn(|c| Cell::new(i, c)),
            LineKind::Vertical => std::array::from_fn(|r| Cell::new(r, i - Cell::SIZE)),
            LineKind::Diagonal if self == Self::MAIN_DIAGONAL => {
                std::array::from_fn(|t| Cell::new(t, t))
            }
            LineKind::Diagonal => std::array::from_fn(|t| Cell::new(t, Cell::SIZE - 1 - t)),
        }
    }

    /// Returns the lines passing through `cell`.
    ///
    /// The column comes first, then the row, then any diagonal. This is the
    /// order in which wins are reported when a placement completes several
    /// lines at once.
    #[must_use]
    pub fn containing(cell: Cell) -> ArrayVec<Self, 3> {
        debug_assert!(cell.is_valid());
        let mut lines = ArrayVec::new();
        lines.push(Self::column(cell.col()));
        lines.push(Self::row(cell.row()));
        if cell.is_on_main_diagonal() {
            lines.push(Self::MAIN_DIAGONAL);
        }
        if cell.is_on_anti_diagonal() {
            lines.push(Self::ANTI_DIAGONAL);
        }
        lines
    }
}

/// Running per-attribute tally of the pieces on a line.
///
/// Tracks how many pieces have been added and, for every attribute, how many
/// of them have it set. A full line is a winning line iff some attribute
/// count is 0 (all false) or 4 (all true), which is the same as every member
/// agreeing on that attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTally {
    true_counts: [u8; Attribute::LEN],
    filled: u8,
}

impl LineTally {
    pub const EMPTY: Self = Self {
        true_counts: [0; Attribute::LEN],
        filled: 0,
    };

    #[must_use]
    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = GamePiece>,
    {
        pieces.into_iter().fold(Self::EMPTY, Self::with)
    }

    pub fn add(&mut self, piece: GamePiece) {
        debug_assert!(usize::from(self.filled) < Cell::SIZE);
        self.filled += 1;
        for attr in Attribute::ALL {
            self.true_counts[attr.index()] += u8::from(piece.attribute(attr));
        }
    }

    /// Returns a copy of this tally with `piece` added.
    #[must_use]
    pub fn with(mut self, piece: GamePiece) -> Self {
        self.add(piece);
        self
    }

    #[must_use]
    pub fn filled(self) -> usize {
        usize::from(self.filled)
    }

    #[must_use]
    pub fn true_count(self, attribute: Attribute) -> usize {
        usize::from(self.true_counts[attribute.index()])
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.filled() == Cell::SIZE
    }

    /// Returns `true` if the line is full and its members agree on at least
    /// one attribute.
    #[must_use]
    pub fn is_winning(self) -> bool {
        self.is_full()
            && self
                .true_counts
                .iter()
                .any(|&count| count == 0 || count == self.filled)
    }
}
