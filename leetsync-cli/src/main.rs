//! Leetsync — sync accepted LeetCode solutions into a local git repository.
//!
//! # Usage
//!
//! ```text
//! leetsync init <repo-path> [--session <cookie>] [--csrf <cookie>] [--remote <name>]
//! leetsync sync [--dry-run] [--keep-going] [--push] [--refresh-problems]
//! leetsync status [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{init::InitArgs, status::StatusArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "leetsync",
    version,
    about = "Sync accepted LeetCode solutions into a git repository, one commit per solution",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the initial `~/.leetsync/config.json`.
    Init(InitArgs),

    /// Fetch accepted submissions and commit the new ones.
    Sync(SyncArgs),

    /// Show what has been synced so far.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
