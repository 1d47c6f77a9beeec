//! Turn driver: HTTP session, configuration, and game recording.
//!
//! The driver owns everything the decision core treats as external:
//! fetching snapshots, posting moves, pacing, and persistence. It talks
//! to the core only through "parsed snapshot in, direction out".

mod config;
mod http;
mod recorder;

pub use config::{BotConfig, GameMode};
pub use http::{GameClient, GameOutcome};
pub use recorder::{Recorder, load_recording};

use std::fmt;
use std::io;

use crate::error::ParseError;

/// Errors surfaced by the turn driver.
#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, read).
    Http(reqwest::Error),
    /// The server answered with a non-success status.
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, useful for key/mode mistakes.
        body: String,
    },
    /// A turn payload could not be parsed; the game was abandoned.
    Parse(ParseError),
    /// The state payload carried no play URL to post moves to.
    MissingPlayUrl,
    /// Filesystem failure (config file or recording).
    Io(io::Error),
    /// Malformed configuration file.
    Config(toml::de::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "http error: {e}"),
            ClientError::Server { status, body } => {
                write!(f, "server returned {status}: {body}")
            }
            ClientError::Parse(e) => write!(f, "bad state payload: {e}"),
            ClientError::MissingPlayUrl => write!(f, "state payload has no playUrl"),
            ClientError::Io(e) => write!(f, "io error: {e}"),
            ClientError::Config(e) => write!(f, "bad config file: {e}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Parse(e) => Some(e),
            ClientError::Io(e) => Some(e),
            ClientError::Config(e) => Some(e),
            ClientError::Server { .. } | ClientError::MissingPlayUrl => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

impl From<ParseError> for ClientError {
    fn from(e: ParseError) -> Self {
        ClientError::Parse(e)
    }
}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        ClientError::Io(e)
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(e: toml::de::Error) -> Self {
        ClientError::Config(e)
    }
}

/// Result type for turn-driver operations.
pub type ClientResult<T> = Result<T, ClientError>;
