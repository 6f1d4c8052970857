//! Game runner for Quarto opponents.
//!
//! - [`Simulation`] - A single game as a turn-by-turn state machine
//! - [`run_simulation`] - Play one game to completion
//! - [`run_batch`] - Play many independent games in parallel
//!
//! # Example
//!
//! ```
//! use quarto_engine::GameSeed;
//! use quarto_evaluator::OpponentKind;
//! use quarto_simulator::{BatchConfig, run_batch};
//!
//! let config = BatchConfig {
//!     games: 8,
//!     seed: Some(GameSeed::from(1)),
//!     ..BatchConfig::default()
//! };
//! let outcomes = run_batch(
//!     &config,
//!     |seed| OpponentKind::Careful.build(seed),
//!     |seed| OpponentKind::Random.build(seed),
//! )
//! .unwrap();
//! assert_eq!(outcomes.len(), 8);
//! ```

pub use self::{batch::*, config::*, simulation::*};

mod batch;
mod config;
mod simulation;
