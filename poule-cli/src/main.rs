//! POULE CLI - Command-line interface
//!
//! Commands:
//! - dispatch: Spread a roster over pools
//! - bouts: Print the bout order of a pool size or of dispatched pools
//! - generate: Write a seeded random demo roster

mod bouts_cmd;
mod dispatch_cmd;
mod generate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poule")]
#[command(about = "Fencing pool dispatcher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spread a roster over pools, balancing criteria
    Dispatch(dispatch_cmd::DispatchArgs),
    /// Print bout orders
    Bouts(bouts_cmd::BoutsArgs),
    /// Generate a random roster
    Generate(generate_cmd::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dispatch(args) => dispatch_cmd::run(args),
        Commands::Bouts(args) => bouts_cmd::run(args),
        Commands::Generate(args) => generate_cmd::run(args),
    }
}
