use quarto_engine::{Cell, GameSeed};
use serde::{Deserialize, Serialize};

/// Error returned when a configuration fails validation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid configuration: {_0}")]
    Validation(#[error(not(source))] String),
}

/// Settings for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum number of turns before the game is reported as diverging.
    ///
    /// A game between well-behaved opponents needs at most one opening
    /// hand-off plus one turn per cell.
    pub turn_limit: usize,
}

impl SimulationConfig {
    /// Longest possible game: the opening hand-off plus 16 placements.
    pub const FULL_GAME_TURNS: usize = Cell::COUNT + 1;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_limit == 0 {
            return Err(ConfigError::Validation(
                "turn_limit must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            turn_limit: Self::FULL_GAME_TURNS,
        }
    }
}

/// Settings for a batch of independent games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of games to play.
    pub games: usize,
    /// Seed from which every game's opponent seeds are derived. A fresh
    /// random seed is drawn when absent.
    pub seed: Option<GameSeed>,
    /// Number of worker threads. Defaults to the available parallelism.
    pub workers: Option<usize>,
    pub simulation: SimulationConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            workers: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::Validation(
                "workers must be at least 1".to_owned(),
            ));
        }
        self.simulation.validate()
    }
}
