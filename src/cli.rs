//! CLI command implementations for Lode.

pub(crate) mod play;
pub(crate) mod replay;
pub(crate) mod tournament;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

use lode::PolicyKind;
use lode::client::{ClientError, GameMode};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Game mode as a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Practice games against server bots.
    Training,
    /// Ranked games against other bots.
    Arena,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Training => GameMode::Training,
            ModeArg::Arena => GameMode::Arena,
        }
    }
}

/// Parse a `--policy` value.
pub(crate) fn parse_policy(value: &str) -> Result<PolicyKind, String> {
    PolicyKind::from_name(value)
        .ok_or_else(|| format!("unknown policy '{value}' (expected heuristic, tactical, or lookahead)"))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lode::ParseError> for CliError {
    fn from(e: lode::ParseError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<lode::tournament::TournamentError> for CliError {
    fn from(e: lode::tournament::TournamentError) -> Self {
        Self::new(e.to_string())
    }
}
