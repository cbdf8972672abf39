//! Alpha-beta negamax for Connect 4.
//!
//! Depth-limited or full-depth negamax over [`games_connect4::Board`] with
//! centre-first move ordering, an immediate-win short-circuit and a
//! direct-mapped [`TranspositionTable`] memoizing terminal evaluations.
//!
//! # Usage
//!
//! ```rust
//! use games_connect4::Board;
//! use negamax::{NegamaxConfig, NegamaxEngine};
//!
//! // A holds columns 0-2 on the bottom row and is to move
//! let board = Board::from_moves("001122").unwrap();
//! let engine = NegamaxEngine::new(NegamaxConfig::default().with_depth(5));
//!
//! let result = engine.get_best_move(&board).unwrap();
//! assert_eq!(result.column, 3);
//! ```
//!
//! [`NegamaxEngine::get_best_move_threaded`] searches each root column on its
//! own scoped thread with a private table and returns the same column and
//! score as the single-threaded search.

pub mod config;
pub mod opening;
pub mod search;
pub mod tt;

pub use config::NegamaxConfig;
pub use opening::get_best_move_early_game;
pub use search::{
    evaluate, loss_score, negamax, win_score, NegamaxEngine, NegamaxError, NegamaxResult,
    MOVE_ORDER,
};
pub use tt::TranspositionTable;
