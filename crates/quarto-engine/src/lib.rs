//! Quarto game engine: piece catalog, board state and incremental win detection.
//!
//! - [`core`] - Immutable building blocks: [`GamePiece`], [`Cell`], [`LineId`], [`LineTally`]
//! - [`engine`] - Mutable game state ([`BoardState`]), the [`Opponent`] contract and
//!   seeding ([`GameSeed`])

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a placement or pending-piece assignment is rejected.
///
/// These are caller bugs: opponents must only propose open cells and
/// pieces that are still available.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("cell {_0} is outside the 4x4 grid")]
    InvalidCoordinate(#[error(not(source))] Cell),
    #[display("cell {_0} is already occupied")]
    CellOccupied(#[error(not(source))] Cell),
    #[display("no piece available to place")]
    MissingPiece,
    #[display("piece {_0} is already on the board")]
    PieceInUse(#[error(not(source))] GamePiece),
    #[display("game already won, no further placement allowed")]
    GameOver,
}
