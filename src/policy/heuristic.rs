//! The canonical priority-chain policy: heal, kill, capture, hold.

use crate::game::GameSnapshot;
use crate::policy::memory::AgentMemory;
use crate::policy::phase::Phase;
use crate::policy::rules::{Action, Decision, Rule, RuleCtx, evaluate, within_turns};
use crate::policy::{Policy, TAVERN_PRICE};
use crate::search::{Obstacles, PathResult};

/// An enemy below this life is worth chasing.
const KILL_LIFE_THRESHOLD: u8 = 40;

/// Maximum steps a kill chase may take.
const KILL_STEP_BUDGET: usize = 5;

/// Turns a freshly captured mine needs to pay for itself (approximates
/// the life/gold cost of contesting it).
const MINE_BREAKEVEN: u32 = 20;

/// Heal when life is at or below the phase's critical threshold, gold
/// covers the tavern price, and a tavern is reachable in time.
pub(crate) fn heal_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let hero = &ctx.snap.hero;
    if hero.life > ctx.phase.critical_life() || hero.gold < TAVERN_PRICE {
        return None;
    }
    let remaining = ctx.remaining();
    let path = ctx.nearest_tavern();
    if path.found() && within_turns(path.steps(), remaining) {
        Some((Action::Heal, path.clone()))
    } else {
        None
    }
}

/// Chase the weakest enemy below the attack-worthiness threshold, if
/// one is reachable within the step budget.
pub(crate) fn kill_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let mut targets: Vec<_> = ctx
        .snap
        .enemies()
        .iter()
        .filter(|e| e.life <= KILL_LIFE_THRESHOLD)
        .collect();
    targets.sort_by_key(|e| (e.life, e.id));

    for enemy in targets {
        let path = ctx.path_to(enemy.pos, Obstacles::Strict);
        if path.found() && path.steps() <= KILL_STEP_BUDGET {
            return Some((Action::Kill, path));
        }
    }
    None
}

/// Capture the nearest unowned mine while the investment can still pay
/// off: `remaining - steps - breakeven > 0`, and only below the phase's
/// mine appetite.
pub(crate) fn capture_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    if ctx.snap.owned_mines().len() >= ctx.phase.want_mines() {
        return None;
    }
    let remaining = i64::from(ctx.remaining());
    let path = ctx.nearest_unowned_mine();
    if !path.found() {
        return None;
    }
    let steps = i64::try_from(path.steps()).unwrap_or(i64::MAX);
    if remaining - steps - i64::from(MINE_BREAKEVEN) > 0 {
        Some((Action::Mine, path.clone()))
    } else {
        None
    }
}

/// The canonical ordered chain.
const RULES: &[Rule] = &[heal_rule, kill_rule, capture_rule];

/// Horizon-aware greedy policy: the fixed heal → kill → capture → hold
/// chain with phase-scaled thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicPolicy;

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn decide(&self, snapshot: &GameSnapshot, memory: &mut AgentMemory) -> Decision {
        decide_with_chain(RULES, snapshot, memory)
    }
}

/// Shared driver for chain policies: respawn handling, degenerate-input
/// guard, chain evaluation, and memory bookkeeping.
pub(crate) fn decide_with_chain(
    rules: &[Rule],
    snapshot: &GameSnapshot,
    memory: &mut AgentMemory,
) -> Decision {
    let respawned = memory.respawn_detected(snapshot.hero.life);
    if respawned {
        memory.reset();
    }

    let decision = if snapshot.finished || !snapshot.board.in_bounds(snapshot.hero.pos) {
        Decision::hold(snapshot.hero.pos)
    } else {
        let phase = Phase::of(snapshot.turn, snapshot.max_turns, respawned);
        let mut ctx = RuleCtx::new(snapshot, phase, memory);
        evaluate(rules, &mut ctx)
    };

    memory.observe(
        snapshot.hero.life,
        snapshot.hero.pos,
        decision.path.last().copied(),
    );
    decision
}
