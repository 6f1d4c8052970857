use quarto_engine::{BoardState, Opponent, PlaceError};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimulationConfig};

/// One of the two seats in a game. `A` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    A,
    B,
}

impl Player {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Where a game stands between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum SimulationState {
    AwaitingMove(Player),
    Won(Player),
    Tied,
}

impl SimulationState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::AwaitingMove(_))
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    PlayerAWon,
    PlayerBWon,
    Tie,
}

impl Outcome {
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::PlayerAWon => Some(Player::A),
            Self::PlayerBWon => Some(Player::B),
            Self::Tie => None,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    /// An opponent made an illegal move.
    #[display("player {player} ({name}) made an illegal move: {source}")]
    Opponent {
        player: Player,
        name: String,
        board: Box<BoardState>,
        source: PlaceError,
    },
    /// The game ran past the turn limit without finishing.
    #[display("game still running after {turns} turns")]
    Divergence {
        turns: usize,
        board: Box<BoardState>,
    },
    #[display("{_0}")]
    Config(ConfigError),
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl SimulationError {
    /// Board at the time of failure, if the failure happened mid-game.
    #[must_use]
    pub fn board(&self) -> Option<&BoardState> {
        match self {
            Self::Opponent { board, .. } | Self::Divergence { board, .. } => Some(&**board),
            Self::Config(_) => None,
        }
    }
}

/// A single game driven one turn at a time.
///
/// # State Machine
///
/// ```text
/// AwaitingMove(A) ─turn─> Won(A) | Tied | AwaitingMove(B)
/// AwaitingMove(B) ─turn─> Won(B) | Tied | AwaitingMove(A)
/// ```
///
/// The mover of the turn that sets the board's win state wins. A full board
/// without a win is a tie.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    board: BoardState,
    state: SimulationState,
    turns: usize,
}

impl Simulation {
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            board: BoardState::new(),
            state: SimulationState::AwaitingMove(Player::A),
            turns: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of turns played so far.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Plays one turn for the player to move.
    ///
    /// Does nothing once the game is over.
    pub fn step<A, B>(
        &mut self,
        opponents: &mut (A, B),
    ) -> Result<SimulationState, SimulationError>
    where
        A: Opponent,
        B: Opponent,
    {
        let SimulationState::AwaitingMove(player) = self.state else {
            return Ok(self.state);
        };
        if self.turns >= self.config.turn_limit {
            return Err(SimulationError::Divergence {
                turns: self.turns,
                board: Box::new(self.board.clone()),
            });
        }

        let opponent: &mut dyn Opponent = match player {
            Player::A => &mut opponents.0,
            Player::B => &mut opponents.1,
        };
        if let Err(source) = opponent.take_turn(&mut self.board) {
            return Err(SimulationError::Opponent {
                player,
                name: opponent.name().to_owned(),
                board: Box::new(self.board.clone()),
                source,
            });
        }
        self.turns += 1;

        self.state = if self.board.is_won() {
            SimulationState::Won(player)
        } else if self.board.is_full() {
            SimulationState::Tied
        } else {
            SimulationState::AwaitingMove(player.other())
        };
        log::trace!(
            "turn {}: player {player} ({}) -> {:?}",
            self.turns,
            opponent.name(),
            self.state
        );
        Ok(self.state)
    }

    /// Plays turns until the game is over.
    pub fn run<A, B>(&mut self, opponents: &mut (A, B)) -> Result<Outcome, SimulationError>
    where
        A: Opponent,
        B: Opponent,
    {
        loop {
            match self.step(opponents)? {
                SimulationState::AwaitingMove(_) => {}
                SimulationState::Won(Player::A) => return Ok(Outcome::PlayerAWon),
                SimulationState::Won(Player::B) => return Ok(Outcome::PlayerBWon),
                SimulationState::Tied => return Ok(Outcome::Tie),
            }
        }
    }
}

/// Plays one game between `a` (moving first) and `b` on a fresh board.
pub fn run_simulation<A, B>(
    a: A,
    b: B,
    config: &SimulationConfig,
) -> Result<Outcome, SimulationError>
where
    A: Opponent,
    B: Opponent,
{
    config.validate()?;
    log::debug!("starting game: {} vs {}", a.name(), b.name());
    let mut opponents = (a, b);
    let mut simulation = Simulation::new(config.clone());
    match simulation.run(&mut opponents) {
        Ok(outcome) => {
            log::debug!(
                "game over after {} turns: {outcome:?}",
                simulation.turns()
            );
            Ok(outcome)
        }
        Err(err) => {
            log::warn!("game failed: {err}\n{}", simulation.board());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use quarto_engine::{Cell, GameSeed};
    use quarto_evaluator::{OpponentKind, find_winning_spot};

    use super::*;

    /// Does nothing on its turn.
    struct Idle;

    impl Opponent for Idle {
        fn name(&self) -> &str {
            "idle"
        }

        fn take_turn(&mut self, _: &mut BoardState) -> Result<(), PlaceError> {
            Ok(())
        }
    }

    /// Always tries the top-left corner.
    struct Stubborn;

    impl Opponent for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn take_turn(&mut self, board: &mut BoardState) -> Result<(), PlaceError> {
            if board.pending_piece().is_some() {
                board.place_pending(Cell::new(0, 0))?;
            }
            let piece = board.unused_pieces().next();
            board.set_pending(piece)
        }
    }

    #[test]
    fn test_random_games_end_consistently() {
        let config = SimulationConfig::default();
        for seed in 0..50u128 {
            let mut opponents = (
                OpponentKind::Random.build(GameSeed::from(2 * seed)),
                OpponentKind::Random.build(GameSeed::from(2 * seed + 1)),
            );
            let mut simulation = Simulation::new(config.clone());
            let outcome = simulation.run(&mut opponents).unwrap();
            let board = simulation.board();

            assert!(simulation.turns() <= SimulationConfig::FULL_GAME_TURNS);
            assert!(board.placed_count() <= 16);
            assert!(simulation.state().is_terminal());
            match outcome {
                Outcome::Tie => {
                    assert!(board.is_full());
                    assert!(board.win_state().is_none());
                }
                Outcome::PlayerAWon | Outcome::PlayerBWon => assert!(board.is_won()),
            }
            // A moves on odd turns; the last mover wins.
            let last_mover = if simulation.turns() % 2 == 1 {
                Player::A
            } else {
                Player::B
            };
            if let Some(winner) = outcome.winner() {
                assert_eq!(winner, last_mover);
            }
        }
    }

    #[test]
    fn test_step_after_game_over_is_noop() {
        let mut opponents = (
            OpponentKind::Careful.build(GameSeed::from(1)),
            OpponentKind::Careful.build(GameSeed::from(2)),
        );
        let mut simulation = Simulation::new(SimulationConfig::default());
        simulation.run(&mut opponents).unwrap();
        let turns = simulation.turns();
        let state = simulation.step(&mut opponents).unwrap();
        assert!(state.is_terminal());
        assert_eq!(simulation.turns(), turns);
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let err = run_simulation(Stubborn, Stubborn, &SimulationConfig::default()).unwrap_err();
        match &err {
            SimulationError::Opponent {
                player,
                name,
                source,
                ..
            } => {
                // A hands over, B places at (0,0), A tries (0,0) again.
                assert_eq!(*player, Player::A);
                assert_eq!(name, "stubborn");
                assert_eq!(*source, PlaceError::CellOccupied(Cell::new(0, 0)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.board().map(BoardState::placed_count), Some(1));
    }

    #[test]
    fn test_turn_limit_reports_divergence() {
        let config = SimulationConfig { turn_limit: 5 };
        let err = run_simulation(Idle, Idle, &config).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Divergence { turns: 5, .. }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig { turn_limit: 0 };
        let err = run_simulation(Idle, Idle, &config).unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
        assert!(err.board().is_none());
    }

    #[test]
    fn test_roster_plays_every_pairing() {
        let config = SimulationConfig::default();
        for (i, a) in OpponentKind::ALL.into_iter().enumerate() {
            for (j, b) in OpponentKind::ALL.into_iter().enumerate() {
                let seed = (i * OpponentKind::LEN + j) as u128;
                let outcome = run_simulation(
                    a.build(GameSeed::from(2 * seed)),
                    b.build(GameSeed::from(2 * seed + 1)),
                    &config,
                );
                assert!(outcome.is_ok(), "{a} vs {b}: {outcome:?}");
            }
        }
    }

    /// Asserts that the wrapped opponent wins on every turn it is handed a
    /// piece with a winning cell.
    struct MustTakeWins<O> {
        inner: O,
        wins_taken: usize,
    }

    impl<O: Opponent> Opponent for MustTakeWins<O> {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn take_turn(&mut self, board: &mut BoardState) -> Result<(), PlaceError> {
            let can_win = board
                .pending_piece()
                .is_some_and(|piece| find_winning_spot(board, piece).is_some());
            self.inner.take_turn(board)?;
            if can_win {
                assert!(board.is_won(), "{} missed a win:\n{board}", self.inner.name());
                self.wins_taken += 1;
            }
            Ok(())
        }
    }

    #[test]
    fn test_forced_win_always_taken() {
        let mut wins_taken = 0;
        for seed in 0..50u128 {
            let mut opponents = (
                OpponentKind::Random.build(GameSeed::from(2 * seed)),
                MustTakeWins {
                    inner: OpponentKind::Careful.build(GameSeed::from(2 * seed + 1)),
                    wins_taken: 0,
                },
            );
            let mut simulation = Simulation::new(SimulationConfig::default());
            let outcome = simulation.run(&mut opponents).unwrap();
            if opponents.1.wins_taken > 0 {
                assert_eq!(outcome, Outcome::PlayerBWon);
            }
            wins_taken += opponents.1.wins_taken;
        }
        assert!(wins_taken > 0);
    }
}
