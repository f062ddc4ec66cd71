//! Fabula CLI binary.
//!
//! This binary is the cron entry point: one invocation of `fabula step`
//! advances the story by exactly one published step. `fabula state` prints
//! the persisted record for operational debugging.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_state, run_step};

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Step { dry_run } => {
            run_step(dry_run).await?;
        }

        Commands::State => {
            print_state().await?;
        }
    }

    Ok(())
}
