//! Kanban CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kanban_cli::cli::Cli;
use kanban_cli::commands;

fn main() {
    // Load .env.local if it exists (for KANBAN_STATE_DIR)
    let _ = dotenvy::from_filename(".env.local");

    let mut cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let state_dir = cli.state_dir();
    let command = cli.take_command();

    if let Err(e) = commands::execute(command, &state_dir, cli.format) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
