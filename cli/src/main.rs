mod cli;
mod commands;
mod format;
mod interactive;
mod live_search;
mod loading;
mod output;

use clap::Parser;
use marklist::{config, error::Result};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still wins over --debug
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.version {
        println!("marklist {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };
    log::debug!("Configuration: {:?}", cfg);

    cli::handle_args(args, &cfg)?;

    Ok(())
}
