use std::{num::NonZeroUsize, thread};

use quarto_engine::{GameSeed, Opponent};
use rand::Rng as _;

use crate::{
    config::BatchConfig,
    simulation::{Outcome, SimulationError, run_simulation},
};

/// Plays `config.games` independent games in parallel.
///
/// Game `i` gets its own board and a freshly built pair of opponents:
/// `make_a` and `make_b` are called with seeds derived from the `i`-th seed
/// of the batch seed's stream. Outcomes are returned in game order, so a
/// batch with a fixed seed gives the same results for any worker count.
///
/// Games are split into contiguous chunks, one per worker thread. The first
/// failed game (in game order) is returned as the error.
pub fn run_batch<FA, FB, A, B>(
    config: &BatchConfig,
    make_a: FA,
    make_b: FB,
) -> Result<Vec<Outcome>, SimulationError>
where
    FA: Fn(GameSeed) -> A + Sync,
    FB: Fn(GameSeed) -> B + Sync,
    A: Opponent,
    B: Opponent,
{
    config.validate()?;

    let batch_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut seeder = batch_seed.rng();
    let game_seeds: Vec<GameSeed> = (0..config.games).map(|_| seeder.random()).collect();

    let workers = config
        .workers
        .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get))
        .clamp(1, config.games.max(1));
    let chunk_size = config.games.div_ceil(workers).max(1);
    log::debug!(
        "running {} games on {workers} workers (seed {batch_seed})",
        config.games
    );

    let mut results: Vec<Option<Result<Outcome, SimulationError>>> = Vec::new();
    results.resize_with(config.games, || None);

    thread::scope(|s| {
        for (slots, seeds) in results
            .chunks_mut(chunk_size)
            .zip(game_seeds.chunks(chunk_size))
        {
            let make_a = &make_a;
            let make_b = &make_b;
            let simulation = &config.simulation;
            s.spawn(move || {
                for (slot, &seed) in slots.iter_mut().zip(seeds) {
                    let mut rng = seed.rng();
                    let a = make_a(rng.random());
                    let b = make_b(rng.random());
                    *slot = Some(run_simulation(a, b, simulation));
                }
            });
        }
    });

    let outcomes = results.into_iter().flatten().collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "batch done: {} A wins, {} B wins, {} ties",
        count(&outcomes, Outcome::PlayerAWon),
        count(&outcomes, Outcome::PlayerBWon),
        count(&outcomes, Outcome::Tie),
    );
    Ok(outcomes)
}

fn count(outcomes: &[Outcome], outcome: Outcome) -> usize {
    outcomes.iter().filter(|&&o| o == outcome).count()
}

#[cfg(test)]
mod tests {
    use quarto_evaluator::OpponentKind;

    use super::*;
    use crate::config::SimulationConfig;

    fn config(games: usize, workers: usize) -> BatchConfig {
        BatchConfig {
            games,
            seed: Some(GameSeed::from(0x5eed)),
            workers: Some(workers),
            simulation: SimulationConfig::default(),
        }
    }

    fn careful_vs_random(config: &BatchConfig) -> Vec<Outcome> {
        run_batch(
            config,
            |seed| OpponentKind::Careful.build(seed),
            |seed| OpponentKind::Random.build(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_batch_returns_one_outcome_per_game() {
        assert_eq!(careful_vs_random(&config(25, 3)).len(), 25);
        assert!(careful_vs_random(&config(0, 3)).is_empty());
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let first = careful_vs_random(&config(40, 4));
        let second = careful_vs_random(&config(40, 4));
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcomes_independent_of_worker_count() {
        let single = careful_vs_random(&config(30, 1));
        let many = careful_vs_random(&config(30, 7));
        assert_eq!(single, many);
    }

    #[test]
    fn test_games_use_distinct_seeds() {
        let outcomes = run_batch(
            &config(20, 2),
            |seed| OpponentKind::Random.build(seed),
            |seed| OpponentKind::Random.build(seed),
        )
        .unwrap();
        // Identical seeds would give twenty identical outcomes.
        assert!(outcomes.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = run_batch(
            &config(10, 0),
            |seed| OpponentKind::Random.build(seed),
            |seed| OpponentKind::Random.build(seed),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }
}
