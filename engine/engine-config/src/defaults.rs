//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so the binary and the
//! checked-in file can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    monte_carlo: MonteCarloDefaults,
    mcts: MctsDefaults,
    negamax: NegamaxDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MonteCarloDefaults {
    iterations_per_column: u32,
    threads_per_column: usize,
    time_limit_ms: u64,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    simulations: u32,
    exploration: f64,
    rollout_threads: usize,
    time_limit_ms: u64,
}

#[derive(Debug, Deserialize)]
struct NegamaxDefaults {
    depth: u32,
    full_depth: bool,
    table_size: usize,
    threaded: bool,
    use_opening_book: bool,
    time_limit_ms: u64,
    max_nodes: u64,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    strategy: String,
    difficulty: String,
    opponent: String,
    self_play_games: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Flat Monte Carlo
pub fn iterations_per_column() -> u32 {
    DEFAULTS.monte_carlo.iterations_per_column
}
pub fn threads_per_column() -> usize {
    DEFAULTS.monte_carlo.threads_per_column
}
pub fn monte_carlo_time_limit_ms() -> u64 {
    DEFAULTS.monte_carlo.time_limit_ms
}

// MCTS
pub fn mcts_iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn mcts_simulations() -> u32 {
    DEFAULTS.mcts.simulations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn rollout_threads() -> usize {
    DEFAULTS.mcts.rollout_threads
}
pub fn mcts_time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}

// Negamax
pub fn negamax_depth() -> u32 {
    DEFAULTS.negamax.depth
}
pub fn full_depth() -> bool {
    DEFAULTS.negamax.full_depth
}
pub fn table_size() -> usize {
    DEFAULTS.negamax.table_size
}
pub fn negamax_threaded() -> bool {
    DEFAULTS.negamax.threaded
}
pub fn use_opening_book() -> bool {
    DEFAULTS.negamax.use_opening_book
}
pub fn negamax_time_limit_ms() -> u64 {
    DEFAULTS.negamax.time_limit_ms
}
pub fn negamax_max_nodes() -> u64 {
    DEFAULTS.negamax.max_nodes
}

// Actor
pub fn strategy() -> &'static str {
    &DEFAULTS.actor.strategy
}
pub fn difficulty() -> &'static str {
    &DEFAULTS.actor.difficulty
}
pub fn opponent() -> &'static str {
    &DEFAULTS.actor.opponent
}
pub fn self_play_games() -> u32 {
    DEFAULTS.actor.self_play_games
}
pub fn seed() -> u64 {
    DEFAULTS.actor.seed
}
