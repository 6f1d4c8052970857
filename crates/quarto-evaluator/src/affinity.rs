//! Placement by line affinity.
//!
//! The affinity of a line for a piece is the fraction of the line's filled
//! cells holding a piece that shares at least one attribute with it. An
//! empty line has affinity 0.

use arrayvec::ArrayVec;
use quarto_engine::{BoardState, Cell, GamePiece, LineId};

/// Which family of lines to group open cells by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    #[must_use]
    pub const fn line_of(self, cell: Cell) -> LineId {
        match self {
            Self::Row => LineId::row(cell.row()),
            Self::Column => LineId::column(cell.col()),
        }
    }
}

/// Whether to seek the line with the highest or the lowest affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    Similar,
    Dissimilar,
}

impl Affinity {
    fn prefers(self, candidate: f32, best: f32) -> bool {
        match self {
            Self::Similar => candidate > best,
            Self::Dissimilar => candidate < best,
        }
    }
}

/// Affinity of `line` for `piece`, in `0.0..=1.0`.
#[must_use]
pub fn line_affinity(board: &BoardState, line: LineId, piece: GamePiece) -> f32 {
    let (filled, shared) = board
        .line_pieces(line)
        .fold((0u8, 0u8), |(filled, shared), other| {
            (filled + 1, shared + u8::from(piece.shares_attribute_with(other)))
        });
    if filled == 0 {
        return 0.0;
    }
    f32::from(shared) / f32::from(filled)
}

/// Returns an open cell on the `axis` line whose affinity for `piece` is
/// highest ([`Affinity::Similar`]) or lowest ([`Affinity::Dissimilar`]).
///
/// Lines are considered in the order their first open cell appears in
/// row-major order, and ties go to the earlier line. The returned cell is the
/// first open cell of the chosen line. Returns `None` if the board is full.
#[must_use]
pub fn open_affinity_spot(
    board: &BoardState,
    piece: GamePiece,
    axis: Axis,
    affinity: Affinity,
) -> Option<Cell> {
    let mut lines = ArrayVec::<LineId, { Cell::SIZE }>::new();
    for cell in board.open_spots() {
        let line = axis.line_of(cell);
        if !lines.contains(&line) {
            lines.push(line);
        }
    }

    let mut best: Option<(LineId, f32)> = None;
    for line in lines {
        let score = line_affinity(board, line, piece);
        match best {
            Some((_, best_score)) if !affinity.prefers(score, best_score) => {}
            _ => best = Some((line, score)),
        }
    }
    best.and_then(|(line, _)| board.open_spots_on(line).next())
}
