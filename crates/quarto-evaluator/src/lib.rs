//! Heuristic decision engine for rule-based Quarto opponents.
//!
//! Decisions are layered:
//!
//! ```text
//! OpponentKind (named roster)
//!     ↓ builds
//! StrategyOpponent (turn protocol, forced-win policy, random fallbacks)
//!     ↓ asks
//! PlacementStrategy / GiveawayStrategy
//!     ↓ use
//! Heuristics (win search, similarity, line affinity)
//! ```
//!
//! # Heuristics
//!
//! - [`win_search`] - One-placement lookahead: winning cells and non-losing pieces
//! - [`similarity`] - Giveaway by attribute distance to the piece just placed
//! - [`affinity`] - Placement on the row or column whose pieces share most (or
//!   least) with the piece being placed
//!
//! All heuristics read a [`BoardState`](quarto_engine::BoardState) and never
//! modify it.
//!
//! # Example
//!
//! ```
//! use quarto_engine::{BoardState, GameSeed, Opponent as _};
//! use quarto_evaluator::OpponentKind;
//!
//! let mut opponent = OpponentKind::Careful.build(GameSeed::from(7));
//! let mut board = BoardState::new();
//!
//! // Opening turn: nothing to place, hand over a piece.
//! opponent.take_turn(&mut board).unwrap();
//! assert!(board.pending_piece().is_some());
//! ```

pub use self::{
    affinity::*, opponent_kind::*, similarity::*, strategy::*, strategy_opponent::*,
    win_search::*,
};

pub mod affinity;
mod opponent_kind;
pub mod similarity;
mod strategy;
mod strategy_opponent;
pub mod win_search;
