//! Tournament command implementation.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use super::{CliError, OutputFormat};
use lode::tournament::{self, TournamentSpec};

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the spec cannot be loaded or the tournament
/// fails to run.
pub(crate) fn execute(spec_path: &Path, progress: bool, format: OutputFormat) -> Result<(), CliError> {
    let spec = TournamentSpec::load(spec_path)?;

    let agents = u64::try_from(spec.agents.len()).unwrap_or(u64::MAX);
    let total = u64::from(spec.games).saturating_mul(agents);
    let bar = if progress {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(bar)
    } else {
        None
    };

    let result = tournament::run(&spec, bar.as_ref())?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    match format {
        OutputFormat::Text => {
            println!(
                "{:<16} {:<10} {:>5} {:>5} {:>9} {:>9}",
                "agent", "policy", "games", "wins", "gold", "abandoned"
            );
            for standing in &result.standings {
                println!(
                    "{:<16} {:<10} {:>5} {:>5} {:>9} {:>9}",
                    standing.name,
                    standing.policy,
                    standing.games,
                    standing.wins,
                    standing.gold,
                    standing.abandoned
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = result
                .standings
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "policy": s.policy,
                        "games": s.games,
                        "wins": s.wins,
                        "gold": s.gold,
                        "abandoned": s.abandoned,
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(rows));
        }
    }
    Ok(())
}
