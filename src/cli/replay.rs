//! Replay command implementation.
//!
//! Re-runs a chosen policy over a recorded game, turn by turn, and
//! prints each rendered board with the owned-mine overlay and the
//! path the policy picked. Decisions shown may differ from the ones
//! made live when replaying a different policy — that is the point.

use std::path::Path;

use super::CliError;
use lode::client::load_recording;
use lode::game::{GameSnapshot, StateDto, board_lines, mark_owned, plot_path};
use lode::policy::AgentMemory;
use lode::PolicyKind;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be read or a recorded
/// payload fails to parse.
pub(crate) fn execute(
    recording: &Path,
    policy: PolicyKind,
    only_turn: Option<u32>,
) -> Result<(), CliError> {
    let states = load_recording(recording)?;
    if states.is_empty() {
        return Err(CliError::new(format!(
            "empty recording: {}",
            recording.display()
        )));
    }

    let policy = policy.build();
    let mut memory = AgentMemory::new();

    for raw in &states {
        let dto = StateDto::parse(raw)?;
        let snapshot = GameSnapshot::from_state(&dto)?;
        let decision = policy.decide(&snapshot, &mut memory);

        if let Some(turn) = only_turn
            && snapshot.turn != turn
        {
            continue;
        }

        println!(
            "turn {}/{} | {} {} | life {} gold {} mines {}",
            snapshot.turn,
            snapshot.max_turns,
            decision.action,
            decision.direction,
            snapshot.hero.life,
            snapshot.hero.gold,
            snapshot.hero.mine_count
        );
        let lines = board_lines(&snapshot.board, snapshot.hero.id);
        let lines = mark_owned(&lines, snapshot.owned_mines(), 'O');
        for line in plot_path(&lines, &decision.path) {
            println!("  |{line}|");
        }
        println!();
    }

    Ok(())
}
