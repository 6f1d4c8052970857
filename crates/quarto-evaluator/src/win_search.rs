//! Forced-win lookahead: one placement deep.

use arrayvec::ArrayVec;
use quarto_engine::{BoardState, Cell, GamePiece};
use rand::{Rng, seq::IndexedRandom as _};

/// Returns the first open cell (row-major) where placing `piece` completes a
/// winning line, or `None` if there is none.
///
/// Every line through the cell is checked: its column, its row and any
/// diagonal it lies on.
#[must_use]
pub fn find_winning_spot(board: &BoardState, piece: GamePiece) -> Option<Cell> {
    board
        .open_spots()
        .find(|&cell| board.wins_with(cell, piece))
}

/// Unused pieces that give the receiving player no immediate win, in
/// catalog order.
pub fn non_losing_pieces(board: &BoardState) -> impl Iterator<Item = GamePiece> + '_ {
    board
        .unused_pieces()
        .filter(move |&piece| find_winning_spot(board, piece).is_none())
}

/// Picks a uniformly random non-losing piece, or `None` if every unused
/// piece hands the opponent a win.
pub fn choose_non_losing_piece<R>(board: &BoardState, rng: &mut R) -> Option<GamePiece>
where
    R: Rng + ?Sized,
{
    let candidates: ArrayVec<GamePiece, { GamePiece::LEN }> = non_losing_pieces(board).collect();
    candidates.choose(rng).copied()
}
