//! Pluggable placement and giveaway decisions.
//!
//! A [`StrategyOpponent`](crate::StrategyOpponent) asks a
//! [`PlacementStrategy`] where to put the piece it was handed and a
//! [`GiveawayStrategy`] which piece to hand over. Either may decline by
//! returning `None`, in which case the opponent falls back to a uniformly
//! random choice.

use quarto_engine::{BoardState, Cell, GamePiece};
use rand::RngCore;

use crate::{
    affinity::{Affinity, Axis, open_affinity_spot},
    similarity::{most_dissimilar_piece, most_similar_piece},
    win_search::{choose_non_losing_piece, find_winning_spot},
};

/// Chooses where to place the piece the opponent was handed.
pub trait PlacementStrategy: Send {
    fn choose_placement(
        &self,
        board: &BoardState,
        piece: GamePiece,
        rng: &mut dyn RngCore,
    ) -> Option<Cell>;
}

/// Chooses the piece to hand to the other player.
pub trait GiveawayStrategy: Send {
    /// `just_placed` is the piece placed earlier in this turn, or `None` on
    /// the opening hand-off.
    fn choose_giveaway(
        &self,
        board: &BoardState,
        just_placed: Option<GamePiece>,
        rng: &mut dyn RngCore,
    ) -> Option<GamePiece>;
}

/// A rng-free placement rule, as used by [`try_in_order`].
pub type PlacementRule<'a> = &'a dyn Fn(&BoardState, GamePiece) -> Option<Cell>;

/// Returns the first placement proposed by `rules`, in order.
#[must_use]
pub fn try_in_order(
    board: &BoardState,
    piece: GamePiece,
    rules: &[PlacementRule<'_>],
) -> Option<Cell> {
    rules.iter().find_map(|rule| rule(board, piece))
}

/// Always defers to the random fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlacement;

impl PlacementStrategy for RandomPlacement {
    fn choose_placement(
        &self,
        _: &BoardState,
        _: GamePiece,
        _: &mut dyn RngCore,
    ) -> Option<Cell> {
        None
    }
}

/// Places on the first cell that wins, if any.
///
/// For opponents built with [`ForcedWinPolicy::Ignore`], which skip the
/// built-in win check but may still want one as a placement rule.
///
/// [`ForcedWinPolicy::Ignore`]: crate::ForcedWinPolicy::Ignore
#[derive(Debug, Default, Clone, Copy)]
pub struct WinningPlacement;

impl PlacementStrategy for WinningPlacement {
    fn choose_placement(
        &self,
        board: &BoardState,
        piece: GamePiece,
        _: &mut dyn RngCore,
    ) -> Option<Cell> {
        find_winning_spot(board, piece)
    }
}

/// Places by line affinity, trying rows before columns.
#[derive(Debug, Clone, Copy)]
pub struct AffinityPlacement {
    pub affinity: Affinity,
}

impl PlacementStrategy for AffinityPlacement {
    fn choose_placement(
        &self,
        board: &BoardState,
        piece: GamePiece,
        _: &mut dyn RngCore,
    ) -> Option<Cell> {
        let affinity = self.affinity;
        try_in_order(
            board,
            piece,
            &[
                &|board: &BoardState, piece: GamePiece| {
                    open_affinity_spot(board, piece, Axis::Row, affinity)
                },
                &|board: &BoardState, piece: GamePiece| {
                    open_affinity_spot(board, piece, Axis::Column, affinity)
                },
            ],
        )
    }
}

/// Hands over a uniformly random unused piece.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomGiveaway;

impl GiveawayStrategy for RandomGiveaway {
    fn choose_giveaway(
        &self,
        board: &BoardState,
        _: Option<GamePiece>,
        rng: &mut dyn RngCore,
    ) -> Option<GamePiece> {
        board.random_unused_piece(rng)
    }
}

/// Hands over a random piece that gives the other player no immediate win.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonLosingGiveaway;

impl GiveawayStrategy for NonLosingGiveaway {
    fn choose_giveaway(
        &self,
        board: &BoardState,
        _: Option<GamePiece>,
        rng: &mut dyn RngCore,
    ) -> Option<GamePiece> {
        choose_non_losing_piece(board, rng)
    }
}

/// Hands over the non-losing piece closest to the one just placed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimilarGiveaway;

impl GiveawayStrategy for SimilarGiveaway {
    fn choose_giveaway(
        &self,
        board: &BoardState,
        just_placed: Option<GamePiece>,
        rng: &mut dyn RngCore,
    ) -> Option<GamePiece> {
        match just_placed {
            Some(reference) => most_similar_piece(board, reference),
            None => choose_non_losing_piece(board, rng),
        }
    }
}

/// Hands over the non-losing piece furthest from the one just placed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DissimilarGiveaway;

impl GiveawayStrategy for DissimilarGiveaway {
    fn choose_giveaway(
        &self,
        board: &BoardState,
        just_placed: Option<GamePiece>,
        rng: &mut dyn RngCore,
    ) -> Option<GamePiece> {
        match just_placed {
            Some(reference) => most_dissimilar_piece(board, reference),
            None => choose_non_losing_piece(board, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn piece(id: u8) -> GamePiece {
        GamePiece::from_id(id).unwrap()
    }

    #[test]
    fn test_try_in_order_takes_first_hit() {
        let board = BoardState::new();
        let none = |_: &BoardState, _: GamePiece| -> Option<Cell> { None };
        let corner = |_: &BoardState, _: GamePiece| Some(Cell::new(3, 3));
        let origin = |_: &BoardState, _: GamePiece| Some(Cell::new(0, 0));

        assert_eq!(try_in_order(&board, piece(0), &[]), None);
        assert_eq!(try_in_order(&board, piece(0), &[&none]), None);
        assert_eq!(
            try_in_order(&board, piece(0), &[&none, &corner, &origin]),
            Some(Cell::new(3, 3))
        );
    }

    #[test]
    fn test_affinity_placement_uses_rows_first() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = BoardState::new();
        board.place(Cell::new(2, 3), piece(1)).unwrap();
        let strategy = AffinityPlacement {
            affinity: Affinity::Similar,
        };
        assert_eq!(
            strategy.choose_placement(&board, piece(0), &mut rng),
            Some(Cell::new(2, 0))
        );
    }

    #[test]
    fn test_placement_strategies() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut board = BoardState::new();
        for (row, id) in [(0, 0), (1, 1), (2, 2)] {
            board.place(Cell::new(row, 1), piece(id)).unwrap();
        }
        assert_eq!(
            RandomPlacement.choose_placement(&board, piece(3), &mut rng),
            None
        );
        assert_eq!(
            WinningPlacement.choose_placement(&board, piece(3), &mut rng),
            Some(Cell::new(3, 1))
        );
    }

    #[test]
    fn test_giveaways_on_opening() {
        let mut rng = Pcg32::seed_from_u64(5);
        let board = BoardState::new();
        let strategies: [&dyn GiveawayStrategy; 4] = [
            &RandomGiveaway,
            &NonLosingGiveaway,
            &SimilarGiveaway,
            &DissimilarGiveaway,
        ];
        for strategy in strategies {
            let piece = strategy.choose_giveaway(&board, None, &mut rng);
            assert!(piece.is_some_and(|p| board.is_available(p)));
        }
    }

    #[test]
    fn test_similarity_giveaways_use_just_placed() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut board = BoardState::new();
        board.place(Cell::new(0, 0), piece(0)).unwrap();
        assert_eq!(
            SimilarGiveaway.choose_giveaway(&board, Some(piece(0)), &mut rng),
            Some(piece(1))
        );
        assert_eq!(
            DissimilarGiveaway.choose_giveaway(&board, Some(piece(0)), &mut rng),
            Some(piece(15))
        );
    }
}
