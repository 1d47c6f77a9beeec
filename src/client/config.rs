//! Bot configuration: TOML file format and defaults.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::client::ClientResult;

/// Which server endpoint to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Practice games against server bots; turn count and map are
    /// chosen by the client.
    Training,
    /// Ranked games against other connected bots.
    Arena,
}

impl GameMode {
    /// Path segment of the start endpoint.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            GameMode::Training => "training",
            GameMode::Arena => "arena",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Client configuration, loadable from a TOML file with every field
/// optional; CLI flags override individual fields afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    /// Base server URL, no trailing slash required.
    pub server_url: String,
    /// API key identifying the bot account. Required to play.
    pub key: String,
    /// Which endpoint to start games on.
    pub mode: GameMode,
    /// Map name requested in training mode (server picks when absent).
    pub map: Option<String>,
    /// Number of games to play in a row.
    pub games: u32,
    /// Turn limit requested in training mode.
    pub turns: u32,
    /// Millisecond pause between turns (0 = full speed).
    pub delay_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost".to_string(),
            key: String::new(),
            mode: GameMode::Training,
            map: Some("m3".to_string()),
            games: 1,
            turns: 300,
            delay_ms: 0,
        }
    }
}

impl BotConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// of this shape.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
