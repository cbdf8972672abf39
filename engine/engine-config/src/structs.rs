//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;
use std::time::Duration;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations_per_column() -> u32 {
    defaults::iterations_per_column()
}
fn d_threads_per_column() -> usize {
    defaults::threads_per_column()
}
fn d_mc_time_limit() -> u64 {
    defaults::monte_carlo_time_limit_ms()
}
fn d_mcts_iterations() -> u32 {
    defaults::mcts_iterations()
}
fn d_mcts_simulations() -> u32 {
    defaults::mcts_simulations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_rollout_threads() -> usize {
    defaults::rollout_threads()
}
fn d_mcts_time_limit() -> u64 {
    defaults::mcts_time_limit_ms()
}
fn d_depth() -> u32 {
    defaults::negamax_depth()
}
fn d_full_depth() -> bool {
    defaults::full_depth()
}
fn d_table_size() -> usize {
    defaults::table_size()
}
fn d_threaded() -> bool {
    defaults::negamax_threaded()
}
fn d_opening_book() -> bool {
    defaults::use_opening_book()
}
fn d_negamax_time_limit() -> u64 {
    defaults::negamax_time_limit_ms()
}
fn d_max_nodes() -> u64 {
    defaults::negamax_max_nodes()
}
fn d_strategy() -> String {
    defaults::strategy().into()
}
fn d_difficulty() -> Option<String> {
    non_empty(defaults::difficulty())
}
fn d_opponent() -> String {
    defaults::opponent().into()
}
fn d_self_play_games() -> u32 {
    defaults::self_play_games()
}
fn d_seed() -> Option<u64> {
    non_zero(defaults::seed())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn non_zero(n: u64) -> Option<u64> {
    (n != 0).then_some(n)
}

/// Zero milliseconds means "no limit".
fn limit(ms: u64) -> Option<Duration> {
    (ms != 0).then(|| Duration::from_millis(ms))
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub negamax: NegamaxConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Flat Monte Carlo configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonteCarloConfig {
    #[serde(default = "d_iterations_per_column")]
    pub iterations_per_column: u32,
    /// Values above 1 select the threaded engine
    #[serde(default = "d_threads_per_column")]
    pub threads_per_column: usize,
    #[serde(default = "d_mc_time_limit")]
    pub time_limit_ms: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations_per_column: defaults::iterations_per_column(),
            threads_per_column: defaults::threads_per_column(),
            time_limit_ms: defaults::monte_carlo_time_limit_ms(),
        }
    }
}

impl MonteCarloConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        limit(self.time_limit_ms)
    }
}

/// MCTS (UCT tree search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_mcts_iterations")]
    pub iterations: u32,
    #[serde(default = "d_mcts_simulations")]
    pub simulations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_rollout_threads")]
    pub rollout_threads: usize,
    #[serde(default = "d_mcts_time_limit")]
    pub time_limit_ms: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::mcts_iterations(),
            simulations: defaults::mcts_simulations(),
            exploration: defaults::exploration(),
            rollout_threads: defaults::rollout_threads(),
            time_limit_ms: defaults::mcts_time_limit_ms(),
        }
    }
}

impl MctsConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        limit(self.time_limit_ms)
    }
}

/// Alpha-beta negamax configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NegamaxConfig {
    #[serde(default = "d_depth")]
    pub depth: u32,
    /// Ignore `depth` and solve to the end of the game
    #[serde(default = "d_full_depth")]
    pub full_depth: bool,
    #[serde(default = "d_table_size")]
    pub table_size: usize,
    #[serde(default = "d_threaded")]
    pub threaded: bool,
    #[serde(default = "d_opening_book")]
    pub use_opening_book: bool,
    #[serde(default = "d_negamax_time_limit")]
    pub time_limit_ms: u64,
    #[serde(default = "d_max_nodes")]
    pub max_nodes: u64,
}

impl Default for NegamaxConfig {
    fn default() -> Self {
        Self {
            depth: defaults::negamax_depth(),
            full_depth: defaults::full_depth(),
            table_size: defaults::table_size(),
            threaded: defaults::negamax_threaded(),
            use_opening_book: defaults::use_opening_book(),
            time_limit_ms: defaults::negamax_time_limit_ms(),
            max_nodes: defaults::negamax_max_nodes(),
        }
    }
}

impl NegamaxConfig {
    /// Depth limit, `None` for a full solve.
    pub fn depth_limit(&self) -> Option<u32> {
        (!self.full_depth).then_some(self.depth)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        limit(self.time_limit_ms)
    }

    /// Node budget, `None` when zero.
    pub fn node_limit(&self) -> Option<u64> {
        non_zero(self.max_nodes)
    }
}

/// Actor (move selection and self-play) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_strategy")]
    pub strategy: String,
    /// Difficulty preset; takes precedence over `strategy` when set
    #[serde(default = "d_difficulty", deserialize_with = "empty_as_none")]
    pub difficulty: Option<String>,
    #[serde(default = "d_opponent")]
    pub opponent: String,
    #[serde(default = "d_self_play_games")]
    pub self_play_games: u32,
    /// Fixed rng seed; `None` seeds from entropy
    #[serde(default = "d_seed", deserialize_with = "zero_as_none")]
    pub seed: Option<u64>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            strategy: defaults::strategy().into(),
            difficulty: non_empty(defaults::difficulty()),
            opponent: defaults::opponent().into(),
            self_play_games: defaults::self_play_games(),
            seed: non_zero(defaults::seed()),
        }
    }
}

// TOML has no null, so "" and 0 stand in for unset
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(non_empty(&s))
}

fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let n = u64::deserialize(deserializer)?;
    Ok(non_zero(n))
}
