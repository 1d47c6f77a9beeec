//! Local tournament runner: several bot accounts in one arena.
//!
//! Each agent is fully independent — its own HTTP session, policy, and
//! memory — running on its own OS thread. No game state is shared
//! across agents, so no locking discipline is needed; the only shared
//! object is an optional progress bar.

use std::fmt;
use std::fs;
use std::path::Path;
use std::thread;

use indicatif::ProgressBar;
use serde::Deserialize;

use crate::client::{BotConfig, ClientError, GameClient, GameMode};
use crate::policy::{AgentMemory, PolicyKind};

/// One competing agent: an account key paired with a policy choice.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    /// Display name used in logs and standings.
    pub name: String,
    /// API key for this agent's account.
    pub key: String,
    /// Which policy drives this agent.
    pub policy: PolicyKind,
}

/// Tournament description, loadable from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentSpec {
    /// Server every agent connects to.
    pub server_url: String,
    /// Which endpoint games are started on.
    pub mode: GameMode,
    /// Map requested in training mode.
    pub map: Option<String>,
    /// Games each agent plays.
    pub games: u32,
    /// Turn limit requested in training mode.
    pub turns: u32,
    /// Millisecond pause between turns.
    pub delay_ms: u64,
    /// The competing agents (at least two).
    pub agents: Vec<AgentSpec>,
}

impl Default for TournamentSpec {
    fn default() -> Self {
        Self {
            server_url: "http://localhost".to_string(),
            mode: GameMode::Arena,
            map: None,
            games: 10,
            turns: 300,
            delay_ms: 0,
            agents: Vec::new(),
        }
    }
}

impl TournamentSpec {
    /// Load a tournament file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// of this shape.
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let text = fs::read_to_string(path).map_err(ClientError::Io)?;
        let spec = toml::from_str(&text).map_err(ClientError::Config)?;
        Ok(spec)
    }
}

/// Aggregate results for one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentStanding {
    /// Agent display name.
    pub name: String,
    /// Policy name.
    pub policy: String,
    /// Games finished.
    pub games: u32,
    /// Games won (most gold at the end).
    pub wins: u32,
    /// Total gold across finished games.
    pub gold: u64,
    /// Games abandoned on errors.
    pub abandoned: u32,
}

/// Final tournament result.
#[derive(Debug, Clone)]
pub struct TournamentResult {
    /// Standings sorted by wins, then gold.
    pub standings: Vec<AgentStanding>,
}

/// Error type for tournament operations.
#[derive(Debug)]
pub enum TournamentError {
    /// Fewer than two agents configured.
    TooFewAgents(usize),
    /// Client-level failure while setting up.
    Client(ClientError),
    /// An agent thread panicked.
    AgentPanicked(String),
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::TooFewAgents(n) => {
                write!(f, "too few agents: {n} (minimum 2)")
            }
            TournamentError::Client(e) => write!(f, "client error: {e}"),
            TournamentError::AgentPanicked(name) => {
                write!(f, "agent thread panicked: {name}")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<ClientError> for TournamentError {
    fn from(e: ClientError) -> Self {
        TournamentError::Client(e)
    }
}

/// Run the tournament: one thread per agent, each playing the
/// configured number of games; standings are merged once every thread
/// joins.
///
/// # Errors
///
/// Returns an error if fewer than two agents are configured or an agent
/// thread panics. Per-game failures are not errors — they count as
/// abandoned games in that agent's standing.
pub fn run(
    spec: &TournamentSpec,
    progress: Option<&ProgressBar>,
) -> Result<TournamentResult, TournamentError> {
    if spec.agents.len() < 2 {
        return Err(TournamentError::TooFewAgents(spec.agents.len()));
    }

    let mut standings = thread::scope(|scope| {
        let handles: Vec<_> = spec
            .agents
            .iter()
            .map(|agent| {
                let name = agent.name.clone();
                let handle = scope.spawn(move || run_agent(spec, agent, progress));
                (name, handle)
            })
            .collect();

        let mut standings = Vec::with_capacity(handles.len());
        let mut panicked = None;
        for (name, handle) in handles {
            match handle.join() {
                Ok(standing) => standings.push(standing),
                Err(_) => panicked = Some(name),
            }
        }
        match panicked {
            Some(name) => Err(TournamentError::AgentPanicked(name)),
            None => Ok(standings),
        }
    })?;

    standings.sort_by(|a, b| (b.wins, b.gold).cmp(&(a.wins, a.gold)));
    Ok(TournamentResult { standings })
}

/// One agent's full tournament: its own client, policy, and memory.
fn run_agent(
    spec: &TournamentSpec,
    agent: &AgentSpec,
    progress: Option<&ProgressBar>,
) -> AgentStanding {
    let mut standing = AgentStanding {
        name: agent.name.clone(),
        policy: agent.policy.name().to_string(),
        ..AgentStanding::default()
    };

    let config = BotConfig {
        server_url: spec.server_url.clone(),
        key: agent.key.clone(),
        mode: spec.mode,
        map: spec.map.clone(),
        games: spec.games,
        turns: spec.turns,
        delay_ms: spec.delay_ms,
    };
    let client = match GameClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}: cannot build client: {e}", agent.name);
            standing.abandoned = spec.games;
            return standing;
        }
    };
    let policy = agent.policy.build();

    for game in 0..spec.games {
        let mut memory = AgentMemory::new();
        match client.play_game(policy.as_ref(), &mut memory, None) {
            Ok(outcome) => {
                standing.games += 1;
                standing.gold += u64::from(outcome.gold);
                if outcome.victory {
                    standing.wins += 1;
                }
                log::info!(
                    "{}: game {}/{} done, victory={}",
                    agent.name,
                    game + 1,
                    spec.games,
                    outcome.victory
                );
            }
            Err(e) => {
                standing.abandoned += 1;
                log::warn!("{}: game {}/{} abandoned: {e}", agent.name, game + 1, spec.games);
            }
        }
        if let Some(bar) = progress {
            bar.inc(1);
        }
    }

    standing
}
