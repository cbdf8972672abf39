//! Error type shared by every strategy.

use games_connect4::BoardError;
use mcts::SearchError;
use negamax::NegamaxError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("No legal moves available")]
    NoLegalMove,

    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    #[error("Monte Carlo search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Negamax search failed: {0}")]
    Negamax(#[from] NegamaxError),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}
