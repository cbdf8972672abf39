//! Configuration for the actor binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use engine_core::{Difficulty, Strategy};
use games_connect4::Board;
use mcts::{MctsConfig, MonteCarloEngine};
use negamax::NegamaxConfig;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}
fn default_strategy() -> String {
    CENTRAL_CONFIG.actor.strategy.clone()
}
fn default_difficulty() -> Option<String> {
    CENTRAL_CONFIG.actor.difficulty.clone()
}
fn default_opponent() -> String {
    CENTRAL_CONFIG.actor.opponent.clone()
}
fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.self_play_games
}
fn default_seed() -> Option<u64> {
    CENTRAL_CONFIG.actor.seed
}
fn default_iterations_per_column() -> u32 {
    CENTRAL_CONFIG.monte_carlo.iterations_per_column
}
fn default_threads_per_column() -> usize {
    CENTRAL_CONFIG.monte_carlo.threads_per_column
}
fn default_mc_time_limit() -> u64 {
    CENTRAL_CONFIG.monte_carlo.time_limit_ms
}
fn default_mcts_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}
fn default_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.simulations
}
fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}
fn default_rollout_threads() -> usize {
    CENTRAL_CONFIG.mcts.rollout_threads
}
fn default_mcts_time_limit() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}
fn default_depth() -> u32 {
    CENTRAL_CONFIG.negamax.depth
}
fn default_full_depth() -> bool {
    CENTRAL_CONFIG.negamax.full_depth
}
fn default_table_size() -> usize {
    CENTRAL_CONFIG.negamax.table_size
}
fn default_threaded() -> bool {
    CENTRAL_CONFIG.negamax.threaded
}
fn default_opening_book() -> bool {
    CENTRAL_CONFIG.negamax.use_opening_book
}
fn default_negamax_time_limit() -> u64 {
    CENTRAL_CONFIG.negamax.time_limit_ms
}
fn default_max_nodes() -> u64 {
    CENTRAL_CONFIG.negamax.max_nodes
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "Connect 4 move engine - picks a column or runs self-play")]
#[command(
    long_about = "Chooses a move for a Connect 4 position with random play, flat Monte Carlo,
UCT tree search or alpha-beta negamax, or plays whole games between two strategies.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Position as a move list, one column digit per ply (e.g. 3342)
    #[arg(long, conflicts_with = "grid")]
    pub moves: Option<String>,

    /// File holding a 6x7 grid of X, O and '.' (top row first)
    #[arg(long)]
    pub grid: Option<PathBuf>,

    /// Strategy: random, monte_carlo, mcts or negamax
    #[arg(long, default_value_t = default_strategy())]
    pub strategy: String,

    /// Difficulty preset (easy, medium, hard); overrides --strategy
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Play games instead of choosing a single move
    #[arg(long)]
    pub self_play: bool,

    /// Strategy facing --strategy in self-play
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,

    /// Number of self-play games
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Rng seed for reproducible play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Flat Monte Carlo: playouts per legal column
    #[arg(long, default_value_t = default_iterations_per_column())]
    pub iterations_per_column: u32,

    /// Flat Monte Carlo: workers per column (above 1 runs threaded)
    #[arg(long, default_value_t = default_threads_per_column())]
    pub threads_per_column: usize,

    /// Flat Monte Carlo: time limit in milliseconds (0 = none)
    #[arg(long, default_value_t = default_mc_time_limit())]
    pub monte_carlo_time_limit_ms: u64,

    /// MCTS: tree iterations per move
    #[arg(long, default_value_t = default_mcts_iterations())]
    pub mcts_iterations: u32,

    /// MCTS: rollouts per expanded node
    #[arg(long, default_value_t = default_simulations())]
    pub simulations: u32,

    /// MCTS: UCT exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// MCTS: rollout worker threads
    #[arg(long, default_value_t = default_rollout_threads())]
    pub rollout_threads: usize,

    /// MCTS: time limit in milliseconds (0 = none)
    #[arg(long, default_value_t = default_mcts_time_limit())]
    pub mcts_time_limit_ms: u64,

    /// Negamax: search depth in plies
    #[arg(long, default_value_t = default_depth())]
    pub depth: u32,

    /// Negamax: solve to the end of the game, ignoring --depth
    #[arg(long, default_value_t = default_full_depth(), action = ArgAction::Set)]
    pub full_depth: bool,

    /// Negamax: transposition table slots
    #[arg(long, default_value_t = default_table_size())]
    pub table_size: usize,

    /// Negamax: one thread per root column
    #[arg(long, default_value_t = default_threaded(), action = ArgAction::Set)]
    pub threaded: bool,

    /// Negamax: answer the first reply from the opening book
    #[arg(long, default_value_t = default_opening_book(), action = ArgAction::Set)]
    pub opening_book: bool,

    /// Negamax: time limit in milliseconds (0 = none)
    #[arg(long, default_value_t = default_negamax_time_limit())]
    pub negamax_time_limit_ms: u64,

    /// Negamax: node budget (0 = none)
    #[arg(long, default_value_t = default_max_nodes())]
    pub max_nodes: u64,
}

impl Config {
    /// Parse CLI arguments, filling unset optional values from the central config.
    pub fn load() -> Self {
        let mut config = Self::parse();
        if config.difficulty.is_none() {
            config.difficulty = default_difficulty();
        }
        if config.seed.is_none() {
            config.seed = default_seed();
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        // Unknown names surface here rather than mid-game
        self.strategy()?;
        if self.self_play {
            self.opponent_strategy()?;
            if self.games == 0 {
                return Err(anyhow!("games must be greater than 0"));
            }
        }

        if self.iterations_per_column == 0 {
            return Err(anyhow!("iterations_per_column must be greater than 0"));
        }
        if self.threads_per_column == 0 {
            return Err(anyhow!("threads_per_column must be greater than 0"));
        }
        if self.simulations == 0 {
            return Err(anyhow!("simulations must be greater than 0"));
        }
        if self.rollout_threads == 0 {
            return Err(anyhow!("rollout_threads must be greater than 0"));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            ));
        }
        if self.table_size == 0 {
            return Err(anyhow!("table_size must be greater than 0"));
        }

        Ok(())
    }

    /// Strategy choosing moves, from --difficulty if given, else --strategy.
    pub fn strategy(&self) -> Result<Strategy> {
        match &self.difficulty {
            Some(level) => {
                let difficulty: Difficulty = level.parse()?;
                Ok(difficulty.strategy())
            }
            None => self.named_strategy(&self.strategy),
        }
    }

    /// Second-seat strategy for self-play.
    pub fn opponent_strategy(&self) -> Result<Strategy> {
        self.named_strategy(&self.opponent)
    }

    /// Strategy `name` carrying the configured engine parameters.
    fn named_strategy(&self, name: &str) -> Result<Strategy> {
        let strategy = match Strategy::from_name(name)? {
            Strategy::Random => Strategy::Random,
            Strategy::MonteCarlo { .. } => {
                let mut engine = MonteCarloEngine::new(self.iterations_per_column)
                    .with_threads_per_column(self.threads_per_column);
                if let Some(limit) = millis(self.monte_carlo_time_limit_ms) {
                    engine = engine.with_time_limit(limit);
                }
                Strategy::MonteCarlo {
                    engine,
                    threaded: self.threads_per_column > 1,
                }
            }
            Strategy::Mcts(_) => {
                let mut uct = MctsConfig::default()
                    .with_iterations(self.mcts_iterations)
                    .with_simulations(self.simulations)
                    .with_exploration(self.exploration)
                    .with_rollout_threads(self.rollout_threads);
                if let Some(limit) = millis(self.mcts_time_limit_ms) {
                    uct = uct.with_time_limit(limit);
                }
                Strategy::Mcts(uct)
            }
            Strategy::Negamax(_) => {
                let mut search = NegamaxConfig::default()
                    .with_table_size(self.table_size)
                    .with_opening_book(self.opening_book)
                    .with_threaded(self.threaded);
                if let Some(limit) = millis(self.negamax_time_limit_ms) {
                    search = search.with_time_limit(limit);
                }
                if self.max_nodes > 0 {
                    search = search.with_max_nodes(self.max_nodes);
                }
                Strategy::Negamax(if self.full_depth {
                    search.full_depth()
                } else {
                    search.with_depth(self.depth)
                })
            }
        };
        Ok(strategy)
    }

    /// Starting position from --moves or --grid, else the empty board.
    pub fn board(&self) -> Result<Board> {
        let board = if let Some(moves) = &self.moves {
            Board::from_moves(moves).with_context(|| format!("invalid move list '{}'", moves))?
        } else if let Some(path) = &self.grid {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read grid from {}", path.display()))?;
            Board::from_grid(&text)
                .with_context(|| format!("invalid grid in {}", path.display()))?
        } else {
            Board::new()
        };

        if !board.is_valid() {
            return Err(anyhow!("position is not reachable in a real game"));
        }
        Ok(board)
    }
}

/// Zero milliseconds means "no limit".
fn millis(ms: u64) -> Option<Duration> {
    (ms != 0).then(|| Duration::from_millis(ms))
}
