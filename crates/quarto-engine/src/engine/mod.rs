//! Game state and turn contract.
//!
//! - [`BoardState`] - The 4×4 grid, pending piece, last move and win state
//! - [`Opponent`] - Anything that can advance a board by one full turn
//! - [`GameSeed`] - Seed for deterministic opponent randomness
//!
//! # Turn Flow
//!
//! 1. The first mover hands over a piece ([`BoardState::set_pending`])
//! 2. The next mover places it ([`BoardState::place_pending`]) and hands over another
//! 3. Repeat until [`BoardState::win_state`] is set or the board is full
//!
//! # Example
//!
//! ```
//! use quarto_engine::{BoardState, Cell, GamePiece};
//!
//! let mut board = BoardState::new();
//! board.set_pending(GamePiece::from_id(0)).unwrap();
//! board.place_pending(Cell::new(0, 0)).unwrap();
//!
//! assert!(board.pending_piece().is_none());
//! assert_eq!(board.open_spots().count(), 15);
//! assert!(board.win_state().is_none());
//! ```

pub use self::{board_state::*, game_seed::*, opponent::*};

mod board_state;
mod game_seed;
mod opponent;
