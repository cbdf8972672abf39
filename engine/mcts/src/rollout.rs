//! Random playouts shared by the flat Monte Carlo engine and tree search.

use std::ops::AddAssign;
use std::thread;

use games_connect4::{Board, COLS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Play uniformly random legal columns until the game ends.
///
/// Returns +1 if side B wins, -1 if side A wins and 0 for a draw.
pub fn simulate_random_play<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<i32, SearchError> {
    let mut board = *board;

    while !board.is_terminal() {
        let mask = board.legal_moves_mask();
        if mask == 0 {
            break;
        }

        // Pick the k-th set bit of the legal mask
        let k = rng.gen_range(0..mask.count_ones());
        let column = (0..COLS)
            .filter(|&c| mask & (1 << c) != 0)
            .nth(k as usize)
            .ok_or(SearchError::NoLegalMove)?;

        board.play(column)?;
    }

    board
        .outcome()
        .map(|outcome| outcome.reward())
        .ok_or(SearchError::NotTerminal)
}

/// Aggregated results of a batch of rollouts, side-B relative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloutTally {
    /// Sum of rollout rewards
    pub score: i64,
    pub wins_b: u32,
    pub wins_a: u32,
    pub draws: u32,
}

impl RolloutTally {
    pub fn record(&mut self, reward: i32) {
        self.score += reward as i64;
        match reward.signum() {
            1 => self.wins_b += 1,
            -1 => self.wins_a += 1,
            _ => self.draws += 1,
        }
    }

    pub fn rollouts(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }
}

impl AddAssign for RolloutTally {
    fn add_assign(&mut self, other: Self) {
        self.score += other.score;
        self.wins_b += other.wins_b;
        self.wins_a += other.wins_a;
        self.draws += other.draws;
    }
}

/// Run `rollouts` playouts from one position on a single rng.
pub fn rollout_serial<R: Rng + ?Sized>(
    board: &Board,
    rollouts: u32,
    rng: &mut R,
) -> Result<RolloutTally, SearchError> {
    let mut tally = RolloutTally::default();
    for _ in 0..rollouts {
        tally.record(simulate_random_play(board, rng)?);
    }
    Ok(tally)
}

/// Split `rollouts` playouts across `threads` scoped workers.
///
/// Workers get `rollouts / threads` playouts each with the remainder going to
/// the first workers. Every worker owns a `ChaCha20Rng` seeded from `rng`, so
/// a seeded caller gets reproducible results. Per-worker tallies are summed
/// after the scope joins.
pub fn rollout_parallel<R: Rng + ?Sized>(
    board: &Board,
    rollouts: u32,
    threads: usize,
    rng: &mut R,
) -> Result<RolloutTally, SearchError> {
    let workers = split_work(rollouts, threads);
    let seeds: Vec<u64> = workers.iter().map(|_| rng.gen()).collect();

    let results: Vec<Result<RolloutTally, SearchError>> = thread::scope(|s| {
        let handles: Vec<_> = workers
            .iter()
            .zip(seeds)
            .map(|(&count, seed)| {
                s.spawn(move || {
                    let mut worker_rng = ChaCha20Rng::seed_from_u64(seed);
                    rollout_serial(board, count, &mut worker_rng)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut total = RolloutTally::default();
    for result in results {
        total += result?;
    }
    Ok(total)
}

/// Share `total` units of work between at most `threads` workers.
/// Workers that would receive nothing are dropped.
pub(crate) fn split_work(total: u32, threads: usize) -> Vec<u32> {
    let threads = threads.max(1) as u32;
    let per_thread = total / threads;
    let remainder = total % threads;

    (0..threads)
        .map(|i| per_thread + u32::from(i < remainder))
        .filter(|&n| n > 0)
        .collect()
}
