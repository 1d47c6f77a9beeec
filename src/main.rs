//! Lode CLI - play, tournament, and replay commands.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use lode::PolicyKind;

/// Lode - a pathfinding bot for grid-arena mining games
#[derive(Parser, Debug)]
#[command(name = "lode")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to a server and play one or more games
    Play {
        /// Config file (TOML); flags below override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Server base URL
        #[arg(long)]
        server: Option<String>,

        /// API key for the bot account
        #[arg(short, long)]
        key: Option<String>,

        /// Game mode: training or arena
        #[arg(short, long)]
        mode: Option<cli::ModeArg>,

        /// Map name requested in training mode
        #[arg(long)]
        map: Option<String>,

        /// Number of games to play (default from config: 1)
        #[arg(short, long)]
        games: Option<u32>,

        /// Turn limit requested in training mode
        #[arg(short, long)]
        turns: Option<u32>,

        /// Decision policy: heuristic, tactical, or lookahead
        #[arg(short, long, default_value = "heuristic", value_parser = cli::parse_policy)]
        policy: PolicyKind,

        /// Record each game's raw states under this directory
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run a local multi-agent tournament from a TOML spec
    Tournament {
        /// Tournament spec file (server, games, agents)
        #[arg(required = true)]
        spec: PathBuf,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Re-run a policy over a recorded game and print each turn
    Replay {
        /// Recording file (.jsonl)
        #[arg(required = true)]
        recording: PathBuf,

        /// Decision policy to re-run
        #[arg(short, long, default_value = "heuristic", value_parser = cli::parse_policy)]
        policy: PolicyKind,

        /// Show only this turn
        #[arg(short, long)]
        turn: Option<u32>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            config,
            server,
            key,
            mode,
            map,
            games,
            turns,
            policy,
            save_dir,
            format,
        } => cli::play::execute(cli::play::PlayArgs {
            config,
            server,
            key,
            mode,
            map,
            games,
            turns,
            policy,
            save_dir,
            format,
        }),

        Commands::Tournament {
            spec,
            progress,
            format,
        } => cli::tournament::execute(&spec, progress, format),

        Commands::Replay {
            recording,
            policy,
            turn,
        } => cli::replay::execute(&recording, policy, turn),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
