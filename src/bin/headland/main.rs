//! Headland CLI - dependency resolution for header-only binding libraries

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let Cli { global, command } = Cli::parse();

    // Set up logging
    let filter = if global.verbose {
        EnvFilter::new("headland=debug")
    } else {
        EnvFilter::new("headland=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match command {
        Commands::Resolve(args) => commands::resolve::execute(&global, args),
        Commands::Flags(args) => commands::flags::execute(&global, args),
        Commands::Stage(args) => commands::stage::execute(&global, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
