//! Strategy dispatch for the Connect 4 move engines.
//!
//! This crate ties the engines together behind one entry point:
//! - [`Strategy`]: which engine to run and with what parameters
//! - [`choose_move`]: run a strategy on a board and return a column
//! - [`Difficulty`]: the easy/medium/hard presets
//! - [`play_game`]: play a position out between two strategies
//!
//! ```rust
//! use engine_core::{choose_move, Difficulty};
//! use games_connect4::Board;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::from_moves("001122").unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//!
//! let column = choose_move(&board, &Difficulty::Medium.strategy(), &mut rng).unwrap();
//! assert_eq!(column, 3);
//! ```

pub mod difficulty;
pub mod error;
pub mod game;
pub mod strategy;

pub use difficulty::Difficulty;
pub use error::EngineError;
pub use game::{play_game, GameRecord};
pub use strategy::{choose_move, Strategy};
