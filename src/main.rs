//! Toroid CLI - run the decision core over JSON board snapshots.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Toroid - decision core for a toroidal territory game
#[derive(Parser, Debug)]
#[command(name = "toroid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one turn of moves on a board
    Simulate {
        /// Board snapshot (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Move list (JSON array of {coord, direction})
        #[arg(short, long)]
        moves: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Plan one turn of moves for an owner
    Plan {
        /// Board snapshot (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Owner to plan for (1-255)
        #[arg(short, long)]
        owner: u8,

        /// Configuration file (JSON, defaults for missing fields)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run the local search around one cell
    Search {
        /// Board snapshot (JSON)
        #[arg(short, long)]
        board: PathBuf,

        /// Column of the focal cell
        #[arg(short, long)]
        x: u16,

        /// Row of the focal cell
        #[arg(short, long)]
        y: u16,

        /// Configuration file (JSON, defaults for missing fields)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Generate a random board snapshot as JSON
    Generate {
        /// Random seed
        #[arg(short, long, default_value = "1")]
        seed: u64,

        /// Board width (default: 30)
        #[arg(long, default_value = "30")]
        width: u16,

        /// Board height (default: 30)
        #[arg(long, default_value = "30")]
        height: u16,

        /// Number of players (default: 2)
        #[arg(short, long, default_value = "2")]
        players: u8,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Simulate {
            board,
            moves,
            format,
        } => cli::simulate::execute(&board, &moves, format),

        Commands::Plan {
            board,
            owner,
            config,
            format,
        } => cli::plan::execute(&board, owner, config.as_deref(), format),

        Commands::Search {
            board,
            x,
            y,
            config,
            format,
        } => cli::search::execute(&board, x, y, config.as_deref(), format),

        Commands::Generate {
            seed,
            width,
            height,
            players,
            output,
        } => cli::generate::execute(seed, width, height, players, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
