//! Strategy selection and dispatch.
//!
//! A [`Strategy`] names one of the move engines together with its
//! parameters; [`choose_move`] runs it on a board and returns the column.

use std::fmt;

use games_connect4::Board;
use mcts::{run_mcts, MctsConfig, MonteCarloEngine};
use negamax::{NegamaxConfig, NegamaxEngine};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::error::EngineError;

/// A move engine and its parameters.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Uniformly random legal column.
    Random,
    /// Flat Monte Carlo over each legal column.
    MonteCarlo {
        engine: MonteCarloEngine,
        threaded: bool,
    },
    /// UCT tree search with threaded rollouts.
    Mcts(MctsConfig),
    /// Alpha-beta negamax.
    Negamax(NegamaxConfig),
}

impl Strategy {
    /// Names accepted by [`Strategy::from_name`].
    pub const NAMES: &'static [&'static str] = &["random", "monte_carlo", "mcts", "negamax"];

    /// Strategy with default parameters for `name`.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name.to_ascii_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "monte_carlo" | "montecarlo" | "mc" => Ok(Strategy::MonteCarlo {
                engine: MonteCarloEngine::default(),
                threaded: false,
            }),
            "mcts" | "uct" => Ok(Strategy::Mcts(MctsConfig::default())),
            "negamax" => Ok(Strategy::Negamax(NegamaxConfig::default())),
            _ => Err(EngineError::UnknownStrategy(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::MonteCarlo { .. } => "monte_carlo",
            Strategy::Mcts(_) => "mcts",
            Strategy::Negamax(_) => "negamax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::MonteCarlo { engine, threaded } => write!(
                f,
                "monte_carlo(iterations_per_column={}, threads_per_column={}, threaded={})",
                engine.iterations_per_column, engine.threads_per_column, threaded
            ),
            Strategy::Mcts(config) => write!(
                f,
                "mcts(iterations={}, simulations={}, exploration={})",
                config.iterations, config.simulations, config.exploration
            ),
            Strategy::Negamax(config) => match config.depth {
                Some(depth) => write!(f, "negamax(depth={}, threaded={})", depth, config.threaded),
                None => write!(f, "negamax(full, threaded={})", config.threaded),
            },
        }
    }
}

/// Choose a column for the side to move.
///
/// Fails with [`EngineError::NoLegalMove`] on a finished game whatever the
/// strategy.
pub fn choose_move(
    board: &Board,
    strategy: &Strategy,
    rng: &mut ChaCha20Rng,
) -> Result<u8, EngineError> {
    if board.is_terminal() {
        return Err(EngineError::NoLegalMove);
    }

    let column = match strategy {
        Strategy::Random => board
            .legal_moves()
            .choose(rng)
            .map(|&c| c as u8)
            .ok_or(EngineError::NoLegalMove)?,
        Strategy::MonteCarlo { engine, threaded } => {
            let result = if *threaded {
                engine.get_best_move_threaded(board, rng)?
            } else {
                engine.get_best_move(board, rng)?
            };
            result.column
        }
        Strategy::Mcts(config) => run_mcts(board, config.clone(), rng)?.column,
        Strategy::Negamax(config) => {
            let result = NegamaxEngine::new(config.clone()).choose(board)?;
            debug!(
                score = result.score,
                nodes = result.nodes,
                depth = result.depth,
                "Negamax decision"
            );
            result.column
        }
    };

    debug!(
        strategy = strategy.name(),
        column,
        move_count = board.move_count(),
        "Chose move"
    );
    Ok(column)
}
