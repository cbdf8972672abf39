//! Actor - Connect 4 move picker and self-play runner
//!
//! A command-line front end over the move engines that:
//! 1. Loads config.toml (with env overrides) and CLI arguments
//! 2. Builds a position from `--moves` or `--grid`
//! 3. Prints the column chosen by the selected strategy or difficulty
//! 4. With `--self-play`, plays N games against `--opponent` and logs the tally

use anyhow::Result;
use tracing::{error, info};

mod actor;
mod config;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::load();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let self_play = config.self_play;
    let mut actor = Actor::new(config)?;

    let result = if self_play {
        actor.self_play().map(|tally| {
            println!(
                "games={} wins={} losses={} draws={}",
                tally.games, tally.wins, tally.losses, tally.draws
            );
        })
    } else {
        actor.decide().map(|column| println!("{}", column))
    };

    if let Err(e) = &result {
        error!("Actor failed: {}", e);
    }
    result
}
