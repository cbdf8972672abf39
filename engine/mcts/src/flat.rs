//! Flat Monte Carlo move selection.
//!
//! Every legal column is scored by the sum of random playouts started from
//! the position after that column. No tree is built.

use std::thread;
use std::time::{Duration, Instant};

use games_connect4::{Board, Side, COLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::rollout::{rollout_serial, split_work, RolloutTally};
use crate::search::SearchError;

/// Per-column rollout statistics, relative to the side choosing the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnScore {
    pub column: u8,
    /// Sum of rewards (+1 win, -1 loss, 0 draw)
    pub score: i64,
    pub wins: u32,
    pub rollouts: u32,
}

impl ColumnScore {
    fn from_tally(column: u8, mover: Side, tally: RolloutTally) -> Self {
        let (score, wins) = match mover {
            Side::B => (tally.score, tally.wins_b),
            Side::A => (-tally.score, tally.wins_a),
        };
        Self {
            column,
            score,
            wins,
            rollouts: tally.rollouts(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.wins as f64 / self.rollouts as f64
        }
    }
}

/// Outcome of a flat Monte Carlo decision.
#[derive(Debug, Clone)]
pub struct MonteCarloResult {
    /// Column with the highest score
    pub column: u8,
    /// Scores of every evaluated column, ascending by column
    pub columns: Vec<ColumnScore>,
}

impl MonteCarloResult {
    pub fn total_rollouts(&self) -> u32 {
        self.columns.iter().map(|c| c.rollouts).sum()
    }
}

/// Flat Monte Carlo engine.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    pub iterations_per_column: u32,
    /// Workers per column in the threaded variant
    pub threads_per_column: usize,
    /// Stop evaluating further columns once this has elapsed
    pub time_limit: Option<Duration>,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            iterations_per_column: 1000,
            threads_per_column: 1,
            time_limit: None,
        }
    }
}

impl MonteCarloEngine {
    pub fn new(iterations_per_column: u32) -> Self {
        Self {
            iterations_per_column,
            ..Self::default()
        }
    }

    pub fn with_threads_per_column(mut self, threads: usize) -> Self {
        self.threads_per_column = threads;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Score every legal column on the calling thread.
    pub fn get_best_move(
        &self,
        board: &Board,
        rng: &mut ChaCha20Rng,
    ) -> Result<MonteCarloResult, SearchError> {
        let legal = playable_columns(board)?;
        let mover = board.side_to_move();
        let start = Instant::now();

        let mut columns = Vec::with_capacity(legal.len());
        for column in legal {
            if self.deadline_passed(start) && !columns.is_empty() {
                debug!(evaluated = columns.len(), "Monte Carlo time limit reached");
                break;
            }

            let next = board.with_move(column)?;
            let tally = rollout_serial(&next, self.iterations_per_column, rng)?;
            columns.push(ColumnScore::from_tally(column as u8, mover, tally));
        }

        Ok(self.finish(columns))
    }

    /// Score every legal column in parallel.
    ///
    /// Each column's playouts are split across `threads_per_column` workers,
    /// all running concurrently in one scope. Worker rngs are seeded from
    /// `rng`; tallies are reduced per column after the join.
    pub fn get_best_move_threaded(
        &self,
        board: &Board,
        rng: &mut ChaCha20Rng,
    ) -> Result<MonteCarloResult, SearchError> {
        let legal = playable_columns(board)?;
        let mover = board.side_to_move();

        let mut jobs = Vec::new();
        for &column in &legal {
            let next = board.with_move(column)?;
            for count in split_work(self.iterations_per_column, self.threads_per_column) {
                jobs.push((column, next, count, rng.gen::<u64>()));
            }
        }

        let results: Vec<(usize, Result<RolloutTally, SearchError>)> = thread::scope(|s| {
            let handles: Vec<_> = jobs
                .iter()
                .map(|&(column, next, count, seed)| {
                    s.spawn(move || {
                        let mut worker_rng = ChaCha20Rng::seed_from_u64(seed);
                        (column, rollout_serial(&next, count, &mut worker_rng))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        let mut tallies = [RolloutTally::default(); COLS];
        for (column, result) in results {
            tallies[column] += result?;
        }

        let columns = legal
            .into_iter()
            .map(|column| ColumnScore::from_tally(column as u8, mover, tallies[column]))
            .collect();

        Ok(self.finish(columns))
    }

    fn deadline_passed(&self, start: Instant) -> bool {
        self.time_limit
            .map(|limit| start.elapsed() >= limit)
            .unwrap_or(false)
    }

    /// Pick the highest score; the lowest column wins ties.
    fn finish(&self, columns: Vec<ColumnScore>) -> MonteCarloResult {
        let mut best = columns[0];
        for candidate in &columns[1..] {
            if candidate.score > best.score {
                best = *candidate;
            }
        }

        for c in &columns {
            debug!(
                column = c.column,
                score = c.score,
                wins = c.wins,
                win_rate = c.win_rate(),
                "Monte Carlo column"
            );
        }

        MonteCarloResult {
            column: best.column,
            columns,
        }
    }
}

fn playable_columns(board: &Board) -> Result<Vec<usize>, SearchError> {
    if board.is_terminal() {
        return Err(SearchError::NoLegalMove);
    }
    let legal = board.legal_moves();
    if legal.is_empty() {
        return Err(SearchError::NoLegalMove);
    }
    Ok(legal)
}
