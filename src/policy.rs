//! Decision policies.
//!
//! A policy consumes one parsed snapshot plus explicit per-agent memory
//! and emits exactly one action per turn. Implementations:
//! - [`HeuristicPolicy`]: the canonical priority chain (heal, kill,
//!   capture, hold)
//! - [`TacticalPolicy`]: adds recharge, mine defence, richest-enemy
//!   attack, and endgame camping to the same chain
//! - [`LookaheadPolicy`]: bounded depth/branching search over a cloned
//!   snapshot simulation
//!
//! Hard contract shared by all of them: any snapshot that parsed yields
//! a valid direction — degenerate input degrades to Hold, never panics,
//! and every search is bounded by the board.

mod heuristic;
mod lookahead;
mod memory;
mod phase;
mod rules;
mod tactical;
#[cfg(test)]
mod testutil;

pub use heuristic::HeuristicPolicy;
pub use lookahead::{LookaheadConfig, LookaheadPolicy, simulate};
pub use memory::AgentMemory;
pub use phase::Phase;
pub use rules::{Action, Decision, Rule, RuleCtx, evaluate};
pub use tactical::TacticalPolicy;

use serde::Deserialize;

use crate::game::GameSnapshot;

/// Gold price of one tavern heal.
pub const TAVERN_PRICE: u32 = 2;

/// Life restored by one tavern heal (capped at 100).
pub const TAVERN_HEAL: u8 = 50;

/// Life lost when stepping into a hostile mine.
pub const MINE_TAKE_COST: u8 = 20;

/// Gold earned per owned mine per turn.
pub const MINE_INCOME: u32 = 1;

/// Life lost to thirst each turn (never below 1).
pub const THIRST: u8 = 1;

/// A decision policy: one action per snapshot.
pub trait Policy: Send {
    /// Short policy name used in logs and standings.
    fn name(&self) -> &'static str;

    /// Choose one action for the turn.
    ///
    /// Must return a valid decision for any snapshot that parsed, and
    /// must never panic or block unboundedly; Hold is always an
    /// acceptable answer. Memory is the only state carried across
    /// turns and is reset when a respawn is detected.
    fn decide(&self, snapshot: &GameSnapshot, memory: &mut AgentMemory) -> Decision;
}

/// Selectable policy implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// The canonical priority chain.
    Heuristic,
    /// The aggressive chain with mine defence and endgame camping.
    Tactical,
    /// Bounded lookahead over simulated futures.
    Lookahead,
}

impl PolicyKind {
    /// Parse a policy name as used in config files and CLI flags.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "heuristic" => Some(PolicyKind::Heuristic),
            "tactical" => Some(PolicyKind::Tactical),
            "lookahead" => Some(PolicyKind::Lookahead),
            _ => None,
        }
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PolicyKind::Heuristic => "heuristic",
            PolicyKind::Tactical => "tactical",
            PolicyKind::Lookahead => "lookahead",
        }
    }

    /// Instantiate the policy.
    #[must_use]
    pub fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Heuristic => Box::new(HeuristicPolicy),
            PolicyKind::Tactical => Box::new(TacticalPolicy),
            PolicyKind::Lookahead => Box::new(LookaheadPolicy::default()),
        }
    }
}
