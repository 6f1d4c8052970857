use crate::{PlaceError, engine::BoardState};

/// A player that advances a game by one full turn.
///
/// A turn places the pending piece (if any) and then hands over the piece
/// the other player must place next. Implementations must only propose open
/// cells and available pieces; a returned [`PlaceError`] is a bug in the
/// opponent, not a game outcome.
///
/// Opponents own their randomness so that a game is reproducible from the
/// seeds its opponents were built with.
pub trait Opponent: Send {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn take_turn(&mut self, board: &mut BoardState) -> Result<(), PlaceError>;
}

impl<T> Opponent for Box<T>
where
    T: Opponent + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn take_turn(&mut self, board: &mut BoardState) -> Result<(), PlaceError> {
        (**self).take_turn(board)
    }
}
