//! Actor: single-move decisions and self-play runs over the engine-core strategies

use anyhow::Result;
use engine_core::{choose_move, play_game, Strategy};
use games_connect4::{Outcome, Side};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;

/// Win/draw counts from the perspective of the main strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayTally {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_moves: u64,
}

impl SelfPlayTally {
    /// Record a game in which the main strategy played `seat`.
    pub fn record(&mut self, seat: Side, outcome: Outcome, moves: usize) {
        self.games += 1;
        self.total_moves += moves as u64;
        match outcome {
            Outcome::Draw => self.draws += 1,
            Outcome::Win(side) if side == seat => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }
}

pub struct Actor {
    config: Config,
    strategy: Strategy,
    rng: ChaCha20Rng,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let strategy = config.strategy()?;
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        info!(strategy = %strategy, seed = ?config.seed, "Actor initialized");
        Ok(Self {
            config,
            strategy,
            rng,
        })
    }

    /// Choose a column for the configured position.
    pub fn decide(&mut self) -> Result<u8> {
        let board = self.config.board()?;
        debug!(move_count = board.move_count(), "Position\n{}", board);

        let start = Instant::now();
        let column = choose_move(&board, &self.strategy, &mut self.rng)?;
        info!(
            column,
            strategy = self.strategy.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Move chosen"
        );
        Ok(column)
    }

    /// Play the configured number of games against the opponent strategy.
    ///
    /// Seats alternate: the main strategy moves first in even-numbered games.
    pub fn self_play(&mut self) -> Result<SelfPlayTally> {
        let opponent = self.config.opponent_strategy()?;
        let start_board = self.config.board()?;
        let games = self.config.games;

        info!(
            games,
            strategy = %self.strategy,
            opponent = %opponent,
            "Starting self-play"
        );

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(games as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut tally = SelfPlayTally::default();
        for game in 0..games {
            let (seat, first, second) = if game % 2 == 0 {
                (Side::A, &self.strategy, &opponent)
            } else {
                (Side::B, &opponent, &self.strategy)
            };

            let record = play_game(start_board, first, second, &mut self.rng)?;
            tally.record(seat, record.outcome, record.moves.len());

            debug!(
                game = game + 1,
                ?seat,
                outcome = ?record.outcome,
                moves = %record.move_string(),
                "Game finished"
            );
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            games = tally.games,
            wins = tally.wins,
            losses = tally.losses,
            draws = tally.draws,
            win_rate = tally.win_rate(),
            avg_moves = tally.avg_moves(),
            "Self-play complete"
        );
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            moves: None,
            grid: None,
            strategy: "negamax".into(),
            difficulty: None,
            self_play: true,
            opponent: "random".into(),
            games: 6,
            seed: Some(17),
            log_level: "info".into(),
            iterations_per_column: 50,
            threads_per_column: 1,
            monte_carlo_time_limit_ms: 0,
            mcts_iterations: 100,
            simulations: 8,
            exploration: 1.0,
            rollout_threads: 2,
            mcts_time_limit_ms: 0,
            depth: 4,
            full_depth: false,
            table_size: 1000,
            threaded: false,
            opening_book: true,
            negamax_time_limit_ms: 0,
            max_nodes: 0,
        }
    }

    #[test]
    fn test_tally_record() {
        let mut tally = SelfPlayTally::default();
        tally.record(Side::A, Outcome::Win(Side::A), 7);
        tally.record(Side::B, Outcome::Win(Side::A), 12);
        tally.record(Side::B, Outcome::Draw, 42);

        assert_eq!(tally.games, 3);
        assert_eq!(tally.wins, 1);
        assert_eq!(tally.losses, 1);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.total_moves, 61);
        assert!((tally.win_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tally_rates() {
        let tally = SelfPlayTally::default();
        assert_eq!(tally.win_rate(), 0.0);
        assert_eq!(tally.avg_moves(), 0.0);
    }

    #[test]
    fn test_decide_takes_the_win() {
        let mut config = test_config();
        config.moves = Some("001122".into());

        let mut actor = Actor::new(config).unwrap();
        assert_eq!(actor.decide().unwrap(), 3);
    }

    #[test]
    fn test_decide_on_finished_game_fails() {
        let mut config = test_config();
        config.moves = Some("0102030".into());

        let mut actor = Actor::new(config).unwrap();
        assert!(actor.decide().is_err());
    }

    #[test]
    fn test_self_play_counts_every_game() {
        let mut actor = Actor::new(test_config()).unwrap();
        let tally = actor.self_play().unwrap();

        assert_eq!(tally.games, 6);
        assert_eq!(tally.wins + tally.losses + tally.draws, 6);
        assert!(tally.wins >= 4, "negamax won only {} of 6", tally.wins);
    }

    #[test]
    fn test_budgeted_full_solve_decides() {
        let mut config = test_config();
        config.moves = Some("3344".into());
        config.full_depth = true;
        config.negamax_time_limit_ms = 200;

        let start = Instant::now();
        let column = Actor::new(config).unwrap().decide().unwrap();
        assert!(column < 7);
        assert!(start.elapsed().as_secs() < 5);
    }

    #[test]
    fn test_seeded_self_play_is_reproducible() {
        let mut config = test_config();
        config.strategy = "random".into();

        let first = Actor::new(config.clone()).unwrap().self_play().unwrap();
        let second = Actor::new(config).unwrap().self_play().unwrap();
        assert_eq!(first, second);
    }
}
