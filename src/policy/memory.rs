//! Per-agent memory carried across turns.

use crate::game::Coord;

/// How many recent positions are kept for oscillation detection.
const RECENT_CAP: usize = 6;

/// The only state a policy carries between turns.
///
/// Threaded explicitly through [`Policy::decide`]; everything else is
/// rebuilt fresh from each snapshot. Cleared when a respawn is detected
/// (previous life hit zero and current life is back at 100).
///
/// [`Policy::decide`]: crate::policy::Policy::decide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentMemory {
    /// Life observed on the previous turn.
    prev_life: Option<u8>,
    /// Target coordinate chosen on the previous turn.
    prev_target: Option<Coord>,
    /// Recent positions, oldest first.
    recent: Vec<Coord>,
}

impl AgentMemory {
    /// Fresh memory for a new game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the hero respawned since the last observed turn.
    #[must_use]
    pub fn respawn_detected(&self, life: u8) -> bool {
        self.prev_life == Some(0) && life == 100
    }

    /// Life observed on the previous turn.
    #[must_use]
    pub const fn prev_life(&self) -> Option<u8> {
        self.prev_life
    }

    /// Target chosen on the previous turn.
    #[must_use]
    pub const fn prev_target(&self) -> Option<Coord> {
        self.prev_target
    }

    /// Whether the agent is bouncing between two cells: true when the
    /// current position equals where it stood two turns ago.
    #[must_use]
    pub fn oscillating(&self, pos: Coord) -> bool {
        self.recent.len() >= 2 && self.recent[self.recent.len() - 2] == pos
    }

    /// Record this turn's observations after a decision.
    pub fn observe(&mut self, life: u8, pos: Coord, target: Option<Coord>) {
        self.prev_life = Some(life);
        self.prev_target = target;
        if self.recent.len() == RECENT_CAP {
            self.recent.remove(0);
        }
        self.recent.push(pos);
    }

    /// Clear everything (respawn reset rule).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
