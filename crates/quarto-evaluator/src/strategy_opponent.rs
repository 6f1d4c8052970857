use std::fmt;

use quarto_engine::{BoardState, Cell, GamePiece, GameSeed, Opponent, PlaceError};
use rand_pcg::Pcg32;

use crate::{
    strategy::{GiveawayStrategy, PlacementStrategy},
    win_search::find_winning_spot,
};

/// Whether an opponent checks for an immediate win before consulting its
/// placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ForcedWinPolicy {
    Take,
    Ignore,
}

/// Opponent built from a placement strategy and a giveaway strategy.
///
/// Each turn:
///
/// 1. If a piece is pending, place it: on a winning cell when the policy is
///    [`ForcedWinPolicy::Take`] and one exists, otherwise where the placement
///    strategy says, otherwise on a random open cell.
/// 2. Hand over the piece the giveaway strategy picks, or a random unused
///    piece if it declines and the board is not full.
///
/// All randomness comes from a generator seeded at construction.
pub struct StrategyOpponent {
    name: String,
    forced_win: ForcedWinPolicy,
    placement: Box<dyn PlacementStrategy>,
    giveaway: Box<dyn GiveawayStrategy>,
    rng: Pcg32,
}

impl fmt::Debug for StrategyOpponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyOpponent")
            .field("name", &self.name)
            .field("forced_win", &self.forced_win)
            .finish_non_exhaustive()
    }
}

impl StrategyOpponent {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        forced_win: ForcedWinPolicy,
        placement: Box<dyn PlacementStrategy>,
        giveaway: Box<dyn GiveawayStrategy>,
        seed: GameSeed,
    ) -> Self {
        Self {
            name: name.into(),
            forced_win,
            placement,
            giveaway,
            rng: seed.rng(),
        }
    }

    #[must_use]
    pub fn forced_win_policy(&self) -> ForcedWinPolicy {
        self.forced_win
    }

    fn select_placement(&mut self, board: &BoardState, piece: GamePiece) -> Option<Cell> {
        if self.forced_win.is_take()
            && let Some(cell) = find_winning_spot(board, piece)
        {
            log::trace!("{}: taking forced win at {cell}", self.name);
            return Some(cell);
        }
        if let Some(cell) = self
            .placement
            .choose_placement(board, piece, &mut self.rng)
        {
            return Some(cell);
        }
        log::trace!("{}: no placement preference, placing randomly", self.name);
        board.random_open_spot(&mut self.rng)
    }
}

impl Opponent for StrategyOpponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn take_turn(&mut self, board: &mut BoardState) -> Result<(), PlaceError> {
        let mut just_placed = None;
        if let Some(piece) = board.pending_piece()
            && let Some(cell) = self.select_placement(board, piece)
        {
            board.place(cell, piece)?;
            just_placed = Some(piece);
            log::trace!("{}: placed {piece} at {cell}", self.name);
        }

        let mut giveaway = self
            .giveaway
            .choose_giveaway(board, just_placed, &mut self.rng);
        if giveaway.is_none() && !board.is_full() {
            log::trace!("{}: no giveaway preference, giving randomly", self.name);
            giveaway = board.random_unused_piece(&mut self.rng);
        }
        board.set_pending(giveaway)?;
        if let Some(piece) = giveaway {
            log::trace!("{}: handed over {piece}", self.name);
        }
        Ok(())
    }
}
