//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "C4BOT_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the C4BOT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_VAR, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_VAR,
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file falls back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, usize, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional string field, empty clears it
    ($config:expr, $section:ident . $field:ident, $key:expr, optional) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = Some(v).filter(|s: &String| !s.is_empty());
        }
    };
    // Optional numeric field, zero clears it
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) = std::env::var($key)
            .and_then(|s| s.parse::<u64>().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v).filter(|&n| n != 0);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: C4BOT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "C4BOT_COMMON_LOG_LEVEL");

    // Flat Monte Carlo
    env_override!(
        config,
        monte_carlo.iterations_per_column,
        "C4BOT_MONTE_CARLO_ITERATIONS_PER_COLUMN",
        parse
    );
    env_override!(
        config,
        monte_carlo.threads_per_column,
        "C4BOT_MONTE_CARLO_THREADS_PER_COLUMN",
        parse
    );
    env_override!(
        config,
        monte_carlo.time_limit_ms,
        "C4BOT_MONTE_CARLO_TIME_LIMIT_MS",
        parse
    );

    // MCTS
    env_override!(config, mcts.iterations, "C4BOT_MCTS_ITERATIONS", parse);
    env_override!(config, mcts.simulations, "C4BOT_MCTS_SIMULATIONS", parse);
    env_override!(config, mcts.exploration, "C4BOT_MCTS_EXPLORATION", parse);
    env_override!(
        config,
        mcts.rollout_threads,
        "C4BOT_MCTS_ROLLOUT_THREADS",
        parse
    );
    env_override!(
        config,
        mcts.time_limit_ms,
        "C4BOT_MCTS_TIME_LIMIT_MS",
        parse
    );

    // Negamax
    env_override!(config, negamax.depth, "C4BOT_NEGAMAX_DEPTH", parse);
    env_override!(config, negamax.full_depth, "C4BOT_NEGAMAX_FULL_DEPTH", parse);
    env_override!(config, negamax.table_size, "C4BOT_NEGAMAX_TABLE_SIZE", parse);
    env_override!(config, negamax.threaded, "C4BOT_NEGAMAX_THREADED", parse);
    env_override!(
        config,
        negamax.use_opening_book,
        "C4BOT_NEGAMAX_USE_OPENING_BOOK",
        parse
    );
    env_override!(
        config,
        negamax.time_limit_ms,
        "C4BOT_NEGAMAX_TIME_LIMIT_MS",
        parse
    );
    env_override!(config, negamax.max_nodes, "C4BOT_NEGAMAX_MAX_NODES", parse);

    // Actor
    env_override!(config, actor.strategy, "C4BOT_ACTOR_STRATEGY");
    env_override!(
        config,
        actor.difficulty,
        "C4BOT_ACTOR_DIFFICULTY",
        optional
    );
    env_override!(config, actor.opponent, "C4BOT_ACTOR_OPPONENT");
    env_override!(
        config,
        actor.self_play_games,
        "C4BOT_ACTOR_SELF_PLAY_GAMES",
        parse
    );
    env_override!(config, actor.seed, "C4BOT_ACTOR_SEED", optional_parse);

    config
}
