//! Play command implementation.

use std::path::PathBuf;

use super::{CliError, ModeArg, OutputFormat};
use lode::PolicyKind;
use lode::client::{BotConfig, GameClient, GameOutcome};
use lode::policy::AgentMemory;

/// Resolved flags for the play command.
#[derive(Debug)]
pub(crate) struct PlayArgs {
    /// Config file to start from.
    pub(crate) config: Option<PathBuf>,
    /// Server URL override.
    pub(crate) server: Option<String>,
    /// API key override.
    pub(crate) key: Option<String>,
    /// Mode override.
    pub(crate) mode: Option<ModeArg>,
    /// Map override.
    pub(crate) map: Option<String>,
    /// Game count override.
    pub(crate) games: Option<u32>,
    /// Turn limit override.
    pub(crate) turns: Option<u32>,
    /// The policy to play.
    pub(crate) policy: PolicyKind,
    /// Recording directory.
    pub(crate) save_dir: Option<PathBuf>,
    /// Result format.
    pub(crate) format: OutputFormat,
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is unusable or the session
/// cannot be created. Per-game failures are reported but do not stop
/// the remaining games.
pub(crate) fn execute(args: PlayArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if let Some(key) = args.key {
        config.key = key;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(map) = args.map {
        config.map = Some(map);
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(turns) = args.turns {
        config.turns = turns;
    }

    if config.key.is_empty() {
        return Err(CliError::new(
            "an API key is required (--key or the config file)",
        ));
    }

    let games = config.games;
    let client = GameClient::new(config)?;
    let policy = args.policy.build();

    let mut wins = 0u32;
    let mut played = 0u32;
    for game in 1..=games {
        let mut memory = AgentMemory::new();
        match client.play_game(policy.as_ref(), &mut memory, args.save_dir.as_deref()) {
            Ok(outcome) => {
                played += 1;
                if outcome.victory {
                    wins += 1;
                }
                report(game, games, &outcome, args.format);
            }
            Err(e) => {
                eprintln!("game {game}/{games} abandoned: {e}");
            }
        }
    }

    if args.format == OutputFormat::Text {
        println!("won {wins}/{played} finished games");
    }
    Ok(())
}

/// Print one game's outcome.
fn report(game: u32, games: u32, outcome: &GameOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let verdict = if outcome.victory { "WON" } else { "lost" };
            println!(
                "game {game}/{games} ({}): {verdict} after {} turns, gold {}, mines {}, winner {}",
                outcome.game_id, outcome.turns, outcome.gold, outcome.mines, outcome.winner
            );
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "game": game,
                "gameId": outcome.game_id,
                "turns": outcome.turns,
                "gold": outcome.gold,
                "mines": outcome.mines,
                "winner": outcome.winner,
                "victory": outcome.victory,
            });
            println!("{json}");
        }
    }
}
