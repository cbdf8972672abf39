//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the actor binary and anything else that drives the move engines.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`C4BOT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! C4BOT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     C4BOT_COMMON_LOG_LEVEL=debug
//!     C4BOT_MCTS_ITERATIONS=5000
//!     C4BOT_NEGAMAX_DEPTH=8
//!     C4BOT_ACTOR_STRATEGY=mcts
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
