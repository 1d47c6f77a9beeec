//! Rule-chain plumbing shared by the chain policies.
//!
//! A policy chain is a fixed, ordered slice of [`Rule`] function
//! pointers evaluated left-to-right; the first rule returning a usable
//! path wins, and the Hold fallback guarantees termination. The
//! [`RuleCtx`] hands every rule the snapshot, derived turn facts, and a
//! lazy cache so repeated queries for the same target kind run one BFS
//! per turn.

use std::fmt;

use crate::game::{CellKind, Coord, Direction, GameSnapshot};
use crate::policy::memory::AgentMemory;
use crate::policy::phase::Phase;
use crate::search::{self, Obstacles, PathResult};

/// Action label attached to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Walk to (or drink at) a tavern.
    Heal,
    /// Engage an enemy hero.
    Kill,
    /// Capture a mine.
    Mine,
    /// Intercept an enemy threatening an owned mine.
    Defend,
    /// Sit out the endgame next to a tavern.
    Camp,
    /// Stay put.
    Hold,
}

impl Action {
    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Heal => "Heal",
            Action::Kill => "Kill",
            Action::Mine => "Mine",
            Action::Defend => "Defend",
            Action::Camp => "Camp",
            Action::Hold => "Hold",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decided turn: the action, its wire direction, and the chosen path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// What the policy is trying to do.
    pub action: Action,
    /// The direction sent to the server.
    pub direction: Direction,
    /// The path backing the decision; `[current]` for Hold.
    pub path: Vec<Coord>,
}

impl Decision {
    /// The safe default: hold position.
    #[must_use]
    pub fn hold(pos: Coord) -> Self {
        Self {
            action: Action::Hold,
            direction: Direction::Stay,
            path: vec![pos],
        }
    }
}

/// A single condition→action rule.
///
/// Returns `None` when the precondition fails; a returned path that is
/// not `found()` also falls through to the next rule.
pub type Rule = fn(&mut RuleCtx<'_>) -> Option<(Action, PathResult)>;

/// Context handed to each rule in a chain.
#[derive(Debug)]
pub struct RuleCtx<'a> {
    /// The turn's snapshot.
    pub snap: &'a GameSnapshot,
    /// The derived game phase.
    pub phase: Phase,
    /// Read-only view of the agent's memory.
    pub memory: &'a AgentMemory,
    /// Lazily computed path to the nearest tavern.
    nearest_tavern: Option<PathResult>,
    /// Lazily computed path to the nearest unowned mine.
    nearest_unowned_mine: Option<PathResult>,
}

impl<'a> RuleCtx<'a> {
    /// Build a context for one turn.
    #[must_use]
    pub fn new(snap: &'a GameSnapshot, phase: Phase, memory: &'a AgentMemory) -> Self {
        Self {
            snap,
            phase,
            memory,
            nearest_tavern: None,
            nearest_unowned_mine: None,
        }
    }

    /// Turns left before the game ends.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.snap.remaining_turns()
    }

    /// Path to the nearest tavern, computed at most once per turn.
    pub fn nearest_tavern(&mut self) -> &PathResult {
        let snap = self.snap;
        self.nearest_tavern.get_or_insert_with(|| {
            search::nearest(
                &snap.board,
                snap.hero.pos,
                |_, cell| cell == CellKind::Tavern,
                Obstacles::Strict,
            )
        })
    }

    /// Path to the nearest mine not owned by the self hero, computed at
    /// most once per turn. Ownership is judged on the typed cell, so
    /// owned mines are excluded by predicate, not post-filtered.
    pub fn nearest_unowned_mine(&mut self) -> &PathResult {
        let snap = self.snap;
        let me = snap.hero.id;
        self.nearest_unowned_mine.get_or_insert_with(|| {
            search::nearest(
                &snap.board,
                snap.hero.pos,
                move |_, cell| matches!(cell, CellKind::Mine(owner) if owner != Some(me)),
                Obstacles::Strict,
            )
        })
    }

    /// Fresh path to a specific coordinate under the given policy.
    #[must_use]
    pub fn path_to(&self, target: Coord, obstacles: Obstacles) -> PathResult {
        search::to_coord(&self.snap.board, self.snap.hero.pos, target, obstacles)
    }
}

/// True when a path of `steps` fits inside a turn budget.
#[must_use]
pub(crate) fn within_turns(steps: usize, budget: u32) -> bool {
    u64::try_from(steps).is_ok_and(|s| s <= u64::from(budget))
}

/// Evaluate a rule chain: first match with a found path wins; the Hold
/// fallback always terminates the chain.
#[must_use]
pub fn evaluate(rules: &[Rule], ctx: &mut RuleCtx<'_>) -> Decision {
    for rule in rules {
        if let Some((action, path)) = rule(ctx)
            && path.found()
        {
            return Decision {
                action,
                direction: path.first_step(),
                path: path.into_path(),
            };
        }
    }
    Decision::hold(ctx.snap.hero.pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Hero};

    fn snapshot() -> GameSnapshot {
        let tiles = "@1      ".to_string() + &"  ".repeat(12);
        let board = Board::parse(&tiles, 4).unwrap();
        GameSnapshot {
            game_id: "t".to_string(),
            turn: 0,
            max_turns: 100,
            finished: false,
            board,
            hero: Hero::at(1, Coord::new(0, 0)),
            enemies: Vec::new(),
        }
    }

    #[test]
    fn test_empty_chain_holds() {
        let snap = snapshot();
        let memory = AgentMemory::new();
        let mut ctx = RuleCtx::new(&snap, Phase::Opening, &memory);
        let decision = evaluate(&[], &mut ctx);
        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.direction, Direction::Stay);
        assert_eq!(decision.path, vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_first_match_wins() {
        fn skip(_: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
            None
        }
        fn go_east(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
            let pos = ctx.snap.hero.pos;
            Some((
                Action::Mine,
                PathResult::from_path(vec![pos, Coord::new(pos.row, pos.col + 1)]),
            ))
        }
        fn never_reached(_: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
            Some((Action::Kill, PathResult::from_path(vec![Coord::new(9, 9)])))
        }

        let snap = snapshot();
        let memory = AgentMemory::new();
        let mut ctx = RuleCtx::new(&snap, Phase::Opening, &memory);
        let decision = evaluate(&[skip, go_east, never_reached], &mut ctx);
        assert_eq!(decision.action, Action::Mine);
        assert_eq!(decision.direction, Direction::East);
    }

    #[test]
    fn test_unfound_path_falls_through() {
        fn no_path(_: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
            Some((Action::Kill, PathResult::none()))
        }

        let snap = snapshot();
        let memory = AgentMemory::new();
        let mut ctx = RuleCtx::new(&snap, Phase::Opening, &memory);
        let decision = evaluate(&[no_path], &mut ctx);
        assert_eq!(decision.action, Action::Hold);
    }

    #[test]
    fn test_within_turns() {
        assert!(within_turns(5, 5));
        assert!(within_turns(0, 0));
        assert!(!within_turns(6, 5));
    }
}
