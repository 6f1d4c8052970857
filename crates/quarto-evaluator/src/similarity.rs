//! Giveaway selection by attribute distance to a reference piece.
//!
//! Candidates are always the [non-losing pieces](crate::non_losing_pieces),
//! so neither choice hands the opponent an immediate win. Ties go to the
//! candidate that comes first in catalog order.

use std::cmp::Reverse;

use quarto_engine::{BoardState, GamePiece};

use crate::win_search::non_losing_pieces;

/// Non-losing piece with the fewest attributes differing from `reference`.
#[must_use]
pub fn most_similar_piece(board: &BoardState, reference: GamePiece) -> Option<GamePiece> {
    non_losing_pieces(board).min_by_key(|piece| piece.distance_squared(reference))
}

/// Non-losing piece with the most attributes differing from `reference`.
#[must_use]
pub fn most_dissimilar_piece(board: &BoardState, reference: GamePiece) -> Option<GamePiece> {
    // `max_by_key` keeps the last maximum; the reversed id keeps the first.
    non_losing_pieces(board)
        .max_by_key(|piece| (piece.distance_squared(reference), Reverse(piece.id())))
}
