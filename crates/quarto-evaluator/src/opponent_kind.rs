use std::{fmt, str::FromStr};

use quarto_engine::GameSeed;
use serde::{Deserialize, Serialize};

use crate::{
    affinity::Affinity,
    strategy::{
        AffinityPlacement, DissimilarGiveaway, GiveawayStrategy, NonLosingGiveaway,
        PlacementStrategy, RandomGiveaway, RandomPlacement, SimilarGiveaway,
    },
    strategy_opponent::{ForcedWinPolicy, StrategyOpponent},
};

/// The built-in rule-based opponents.
///
/// | Kind | Forced wins | Placement | Giveaway |
/// |------|-------------|-----------|----------|
/// | `random` | ignored | random | random |
/// | `opportunist` | taken | random | random |
/// | `cautious` | ignored | random | non-losing |
/// | `careful` | taken | random | non-losing |
/// | `similar-giver` | taken | random | most similar |
/// | `dissimilar-giver` | taken | random | most dissimilar |
/// | `dissimilar-placer-similar-giver` | taken | dissimilar line | most similar |
/// | `similar-placer-similar-giver` | taken | similar line | most similar |
/// | `similar-placer-dissimilar-giver` | taken | similar line | most dissimilar |
/// | `dissimilar-placer-dissimilar-giver` | taken | dissimilar line | most dissimilar |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpponentKind {
    Random,
    Opportunist,
    Cautious,
    Careful,
    SimilarGiver,
    DissimilarGiver,
    DissimilarPlacerSimilarGiver,
    SimilarPlacerSimilarGiver,
    SimilarPlacerDissimilarGiver,
    DissimilarPlacerDissimilarGiver,
}

impl OpponentKind {
    pub const LEN: usize = 10;

    pub const ALL: [Self; Self::LEN] = [
        Self::Random,
        Self::Opportunist,
        Self::Cautious,
        Self::Careful,
        Self::SimilarGiver,
        Self::DissimilarGiver,
        Self::DissimilarPlacerSimilarGiver,
        Self::SimilarPlacerSimilarGiver,
        Self::SimilarPlacerDissimilarGiver,
        Self::DissimilarPlacerDissimilarGiver,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Opportunist => "opportunist",
            Self::Cautious => "cautious",
            Self::Careful => "careful",
            Self::SimilarGiver => "similar-giver",
            Self::DissimilarGiver => "dissimilar-giver",
            Self::DissimilarPlacerSimilarGiver => "dissimilar-placer-similar-giver",
            Self::SimilarPlacerSimilarGiver => "similar-placer-similar-giver",
            Self::SimilarPlacerDissimilarGiver => "similar-placer-dissimilar-giver",
            Self::DissimilarPlacerDissimilarGiver => "dissimilar-placer-dissimilar-giver",
        }
    }

    #[must_use]
    pub const fn forced_win_policy(self) -> ForcedWinPolicy {
        match self {
            Self::Random | Self::Cautious => ForcedWinPolicy::Ignore,
            _ => ForcedWinPolicy::Take,
        }
    }

    fn placement(self) -> Box<dyn PlacementStrategy> {
        match self {
            Self::Random
            | Self::Opportunist
            | Self::Cautious
            | Self::Careful
            | Self::SimilarGiver
            | Self::DissimilarGiver => Box::new(RandomPlacement),
            Self::SimilarPlacerSimilarGiver | Self::SimilarPlacerDissimilarGiver => {
                Box::new(AffinityPlacement {
                    affinity: Affinity::Similar,
                })
            }
            Self::DissimilarPlacerSimilarGiver | Self::DissimilarPlacerDissimilarGiver => {
                Box::new(AffinityPlacement {
                    affinity: Affinity::Dissimilar,
                })
            }
        }
    }

    fn giveaway(self) -> Box<dyn GiveawayStrategy> {
        match self {
            Self::Random | Self::Opportunist => Box::new(RandomGiveaway),
            Self::Cautious | Self::Careful => Box::new(NonLosingGiveaway),
            Self::SimilarGiver
            | Self::DissimilarPlacerSimilarGiver
            | Self::SimilarPlacerSimilarGiver => Box::new(SimilarGiveaway),
            Self::DissimilarGiver
            | Self::SimilarPlacerDissimilarGiver
            | Self::DissimilarPlacerDissimilarGiver => Box::new(DissimilarGiveaway),
        }
    }

    /// Builds this opponent with its randomness seeded from `seed`.
    #[must_use]
    pub fn build(self, seed: GameSeed) -> StrategyOpponent {
        StrategyOpponent::new(
            self.name(),
            self.forced_win_policy(),
            self.placement(),
            self.giveaway(),
            seed,
        )
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown opponent kind: {name}")]
pub struct ParseOpponentKindError {
    #[error(not(source))]
    name: String,
}

impl FromStr for OpponentKind {
    type Err = ParseOpponentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseOpponentKindError { name: s.to_owned() })
    }
}
