//! Alpha-beta negamax search.
//!
//! Scores are from the point of view of the side to move. A win found one
//! ply ahead scores `43 - move_count`, so faster wins score higher; the
//! mirrored `-43 + move_count` is what the side about to be beaten sees.
//! Positions at the depth horizon score 0.

use std::thread;
use std::time::Instant;

use games_connect4::{Board, BoardError, BOARD_SIZE};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::NegamaxConfig;
use crate::opening::get_best_move_early_game;
use crate::tt::TranspositionTable;

/// Column order for move generation: centre first, then alternating outwards.
pub const MOVE_ORDER: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

/// Bound larger than any reachable score.
const INFINITY: i32 = 1_000;

/// Nodes between clock reads inside the search.
const CLOCK_INTERVAL: u64 = 1_024;

/// Errors that can occur during negamax search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NegamaxError {
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("No legal moves available")]
    NoLegalMove,

    #[error("Position is not terminal")]
    NotTerminal,

    #[error("Search budget exhausted")]
    OutOfBudget,
}

/// Result of a negamax decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegamaxResult {
    pub column: u8,
    /// Score of `column` for the side to move
    pub score: i32,
    /// Nodes visited, summed over all threads
    pub nodes: u64,
    /// Depth of the deepest finished pass, 0 for book and immediate wins
    pub depth: u32,
}

/// Search limits. Deadline and node cap both abort with `OutOfBudget`.
#[derive(Debug, Clone, Copy)]
struct Budget {
    deadline: Option<Instant>,
    max_nodes: Option<u64>,
}

impl Budget {
    const UNLIMITED: Budget = Budget {
        deadline: None,
        max_nodes: None,
    };

    fn over_nodes(&self, nodes: u64) -> bool {
        self.max_nodes.is_some_and(|max| nodes > max)
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Score for completing a four on the move after `move_count` plies.
#[inline]
pub fn win_score(move_count: usize) -> i32 {
    (BOARD_SIZE + 1) as i32 - move_count as i32
}

/// Score seen by the side that is beaten on the next ply.
#[inline]
pub fn loss_score(move_count: usize) -> i32 {
    -win_score(move_count)
}

/// Static value of a finished game, without sign.
///
/// `42 - move_count` if either side has four in a row, 0 for a draw.
pub fn evaluate(board: &Board) -> Result<i32, NegamaxError> {
    if board.winner().is_some() {
        Ok((BOARD_SIZE - board.move_count()) as i32)
    } else if board.is_full() {
        Ok(0)
    } else {
        Err(NegamaxError::NotTerminal)
    }
}

/// Depth-limited alpha-beta negamax from `board`.
pub fn negamax(
    board: &Board,
    alpha: i32,
    beta: i32,
    table: &mut TranspositionTable,
    depth: u32,
) -> Result<i32, NegamaxError> {
    let mut nodes = 0;
    search(board, alpha, beta, table, depth, &Budget::UNLIMITED, &mut nodes)
}

fn search(
    board: &Board,
    mut alpha: i32,
    beta: i32,
    table: &mut TranspositionTable,
    depth: u32,
    budget: &Budget,
    nodes: &mut u64,
) -> Result<i32, NegamaxError> {
    *nodes += 1;
    if budget.over_nodes(*nodes) || (*nodes % CLOCK_INTERVAL == 0 && budget.expired()) {
        return Err(NegamaxError::OutOfBudget);
    }

    if board.is_terminal() {
        let key = TranspositionTable::get_key(board);
        let value = match table.get(key) {
            Some(cached) => cached as i32,
            None => {
                let value = evaluate(board)?;
                table.put(key, value as u8);
                value
            }
        };

        // The side to move is the one that was just beaten
        return Ok(if board.winner().is_some() { -value } else { 0 });
    }

    if depth == 0 {
        return Ok(0);
    }

    if immediate_win(board)?.is_some() {
        return Ok(win_score(board.move_count()));
    }

    let mut best = -INFINITY;
    for column in MOVE_ORDER {
        if !board.is_valid_move(column) {
            continue;
        }

        let child = board.with_move(column)?;
        let score = -search(&child, -beta, -alpha, table, depth - 1, budget, nodes)?;

        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

/// First column in move order that wins on the spot.
fn immediate_win(board: &Board) -> Result<Option<usize>, NegamaxError> {
    for column in MOVE_ORDER {
        if board.is_valid_move(column) && board.move_is_winning(column)? {
            return Ok(Some(column));
        }
    }
    Ok(None)
}

/// Legal root columns in move order.
fn root_columns(board: &Board) -> Result<Vec<usize>, NegamaxError> {
    if board.is_terminal() {
        return Err(NegamaxError::NoLegalMove);
    }

    let columns: Vec<usize> = MOVE_ORDER
        .into_iter()
        .filter(|&c| board.is_valid_move(c))
        .collect();

    if columns.is_empty() {
        return Err(NegamaxError::NoLegalMove);
    }
    Ok(columns)
}

/// Negamax move chooser.
#[derive(Debug, Clone, Default)]
pub struct NegamaxEngine {
    config: NegamaxConfig,
}

impl NegamaxEngine {
    pub fn new(config: NegamaxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NegamaxConfig {
        &self.config
    }

    /// Run the single- or multi-threaded search as configured.
    pub fn choose(&self, board: &Board) -> Result<NegamaxResult, NegamaxError> {
        if self.config.threaded {
            self.get_best_move_threaded(board)
        } else {
            self.get_best_move(board)
        }
    }

    /// Search every root column on the calling thread with one shared table.
    ///
    /// The root window narrows as columns are scored; later columns that
    /// cannot beat the current best fail low and keep the earlier column.
    pub fn get_best_move(&self, board: &Board) -> Result<NegamaxResult, NegamaxError> {
        self.run(board, false)
    }

    /// Search each root column on its own scoped thread.
    ///
    /// Every thread owns a private transposition table and searches with a
    /// full window. Results are compared in move order after the join.
    pub fn get_best_move_threaded(&self, board: &Board) -> Result<NegamaxResult, NegamaxError> {
        self.run(board, true)
    }

    fn run(&self, board: &Board, threaded: bool) -> Result<NegamaxResult, NegamaxError> {
        let columns = root_columns(board)?;
        if let Some(result) = self.shortcut(board)? {
            return Ok(result);
        }

        let depth = self.config.search_depth(board);
        let table_size = self.config.table_size;
        let mut table = TranspositionTable::new(table_size);
        let mut nodes = 0;

        let root = |depth: u32,
                    budget: &Budget,
                    table: &mut TranspositionTable,
                    nodes: &mut u64| {
            if threaded {
                root_threaded(board, &columns, depth, table_size, budget, nodes)
            } else {
                root_serial(board, &columns, depth, table, budget, nodes)
            }
        };

        let (column, score, reached) = if self.config.is_budgeted() {
            let budget = Budget {
                deadline: self
                    .config
                    .time_limit
                    .and_then(|limit| Instant::now().checked_add(limit)),
                max_nodes: self.config.max_nodes,
            };

            // Deepen one ply at a time; the shallowest pass always completes
            let mut completed: Option<(usize, i32, u32)> = None;
            for iteration in depth.min(1)..=depth {
                let limits = if completed.is_some() {
                    budget
                } else {
                    Budget::UNLIMITED
                };
                match root(iteration, &limits, &mut table, &mut nodes) {
                    Ok((column, score)) => completed = Some((column, score, iteration)),
                    Err(NegamaxError::OutOfBudget) => {
                        debug!(depth = iteration, nodes, "negamax budget exhausted");
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }
            completed.ok_or(NegamaxError::NoLegalMove)?
        } else {
            let (column, score) = root(depth, &Budget::UNLIMITED, &mut table, &mut nodes)?;
            (column, score, depth)
        };

        debug!(
            column,
            score,
            nodes,
            depth = reached,
            threaded,
            "negamax search complete"
        );

        Ok(NegamaxResult {
            column: column as u8,
            score,
            nodes,
            depth: reached,
        })
    }

    /// Opening book, then an immediate win, before any search.
    fn shortcut(&self, board: &Board) -> Result<Option<NegamaxResult>, NegamaxError> {
        if self.config.use_opening_book {
            if let Some(column) = get_best_move_early_game(board) {
                debug!(column, "opening book reply");
                return Ok(Some(NegamaxResult {
                    column: column as u8,
                    score: 0,
                    nodes: 0,
                    depth: 0,
                }));
            }
        }

        Ok(immediate_win(board)?.map(|column| NegamaxResult {
            column: column as u8,
            score: win_score(board.move_count()),
            nodes: 0,
            depth: 0,
        }))
    }
}

/// Root pass on the calling thread, narrowing alpha across columns.
fn root_serial(
    board: &Board,
    columns: &[usize],
    depth: u32,
    table: &mut TranspositionTable,
    budget: &Budget,
    nodes: &mut u64,
) -> Result<(usize, i32), NegamaxError> {
    let mut alpha = -INFINITY;
    let mut best: Option<(usize, i32)> = None;

    for &column in columns {
        if budget.over_nodes(*nodes) || budget.expired() {
            return Err(NegamaxError::OutOfBudget);
        }

        let child = board.with_move(column)?;
        let score = -search(
            &child,
            -INFINITY,
            -alpha,
            table,
            depth.saturating_sub(1),
            budget,
            nodes,
        )?;
        trace!(column, score, depth, "negamax root column");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((column, score));
        }
        alpha = alpha.max(score);
    }

    best.ok_or(NegamaxError::NoLegalMove)
}

/// Root pass with one scoped thread and one private table per column.
///
/// Node counts from every thread are added to `nodes` before any error is
/// returned.
fn root_threaded(
    board: &Board,
    columns: &[usize],
    depth: u32,
    table_size: usize,
    budget: &Budget,
    nodes: &mut u64,
) -> Result<(usize, i32), NegamaxError> {
    let base = *nodes;

    let results: Vec<(usize, Result<i32, NegamaxError>, u64)> = thread::scope(|s| {
        let handles: Vec<_> = columns
            .iter()
            .map(|&column| {
                s.spawn(move || {
                    let mut table = TranspositionTable::new(table_size);
                    let mut local = base;
                    let result = board
                        .with_move(column)
                        .map_err(NegamaxError::from)
                        .and_then(|child| {
                            search(
                                &child,
                                -INFINITY,
                                INFINITY,
                                &mut table,
                                depth.saturating_sub(1),
                                budget,
                                &mut local,
                            )
                        })
                        .map(|score| -score);
                    (column, result, local - base)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    *nodes += results.iter().map(|(_, _, n)| n).sum::<u64>();

    let mut best: Option<(usize, i32)> = None;
    for (column, result, _) in results {
        let score = result?;
        trace!(column, score, depth, "negamax root column");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((column, score));
        }
    }

    best.ok_or(NegamaxError::NoLegalMove)
}
