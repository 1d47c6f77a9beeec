//! Aggressive chain variant: recharge, mine defence, richest-enemy
//! attack, endgame camping, on top of the canonical rules.

use crate::game::{CellKind, GameSnapshot};
use crate::policy::heuristic::{capture_rule, decide_with_chain, heal_rule, kill_rule};
use crate::policy::memory::AgentMemory;
use crate::policy::phase::Phase;
use crate::policy::rules::{Action, Decision, Rule, RuleCtx, within_turns};
use crate::policy::{Policy, TAVERN_PRICE};
use crate::search::{Obstacles, PathResult};

/// Top up opportunistically below this life when already next to a tavern.
const RECHARGE_LIFE: u8 = 65;

/// An enemy this close to an owned mine is treated as a raider.
const DEFEND_RADIUS: usize = 2;

/// Mines a rich enemy must hold to be worth hunting.
const RICH_MINES: u32 = 3;

/// Drink when standing next to a tavern with spare gold and a dented
/// life bar. One step, no search.
fn recharge_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let hero = &ctx.snap.hero;
    if hero.life >= RECHARGE_LIFE || hero.gold < TAVERN_PRICE {
        return None;
    }
    let (adjacent, count) = hero.pos.adjacent(ctx.snap.board.size());
    for &next in &adjacent[..count as usize] {
        if ctx.snap.board.get(next) == Some(CellKind::Tavern) {
            return Some((
                Action::Heal,
                PathResult::from_path(vec![hero.pos, next]),
            ));
        }
    }
    None
}

/// Intercept the first enemy about to reach one of our mines, provided
/// we out-live them. Routes to whichever is closer: the raider itself or
/// the threatened mine.
fn defend_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let snap = ctx.snap;
    for &mine in snap.owned_mines() {
        for enemy in snap.enemies() {
            let approach =
                crate::search::to_coord(&snap.board, enemy.pos, mine, Obstacles::Strict);
            if !approach.found()
                || approach.steps() > DEFEND_RADIUS
                || snap.hero.life <= enemy.life
            {
                continue;
            }
            let to_enemy = ctx.path_to(enemy.pos, Obstacles::Strict);
            let to_mine = ctx.path_to(mine, Obstacles::Strict);
            let intercept = match (to_enemy.found(), to_mine.found()) {
                (true, true) => {
                    if to_enemy.steps() <= to_mine.steps() {
                        to_enemy
                    } else {
                        to_mine
                    }
                }
                (true, false) => to_enemy,
                (false, true) => to_mine,
                (false, false) => continue,
            };
            return Some((Action::Defend, intercept));
        }
    }
    None
}

/// Hunt the enemy with the largest mine portfolio when we can win the
/// trade: enough life to survive the walk plus the exchange.
fn attack_richest_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let snap = ctx.snap;
    let richest = snap
        .enemies()
        .iter()
        .max_by_key(|e| (e.mine_count, std::cmp::Reverse(e.id)))?;
    if richest.mine_count < RICH_MINES {
        return None;
    }
    let path = ctx.path_to(richest.pos, Obstacles::Strict);
    if !path.found() {
        return None;
    }
    let steps = i64::try_from(path.steps()).unwrap_or(i64::MAX);
    let my_life = i64::from(snap.hero.life);
    let arrival_life = my_life - steps - 1;
    let safe = my_life > i64::from(ctx.phase.critical_life()) + steps * 5;
    if within_turns(path.steps(), ctx.remaining())
        && arrival_life >= i64::from(richest.life)
        && safe
    {
        Some((Action::Kill, path))
    } else {
        None
    }
}

/// Capture with a twist: when the agent is bouncing between two cells
/// on its way to the same target, re-route through contested squares so
/// a hero camped in the corridor becomes something to walk at, not
/// around.
fn capture_with_reroute_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let base = capture_rule(ctx)?;
    if !ctx.memory.oscillating(ctx.snap.hero.pos) {
        return Some(base);
    }
    let snap = ctx.snap;
    let me = snap.hero.id;
    let loose = crate::search::nearest(
        &snap.board,
        snap.hero.pos,
        move |_, cell| matches!(cell, CellKind::Mine(owner) if owner != Some(me)),
        Obstacles::ThroughHeroes,
    );
    if loose.found() {
        Some((Action::Mine, loose))
    } else {
        Some(base)
    }
}

/// In the endgame, when leading on mines, park next to a tavern and
/// defend the lead instead of stretching for more.
fn endgame_camp_rule(ctx: &mut RuleCtx<'_>) -> Option<(Action, PathResult)> {
    let snap = ctx.snap;
    if ctx.phase != Phase::End {
        return None;
    }
    let leading = snap
        .enemies()
        .iter()
        .all(|e| snap.hero.mine_count >= e.mine_count);
    if !leading {
        return None;
    }
    let remaining = ctx.remaining();
    let path = ctx.nearest_tavern();
    if path.found() && within_turns(path.steps(), remaining) {
        Some((Action::Camp, path.clone()))
    } else {
        None
    }
}

/// The tactical ordering. Recharge and heal stay in front; everything
/// else slots between kill and the capture fallback.
const RULES: &[Rule] = &[
    recharge_rule,
    heal_rule,
    defend_rule,
    kill_rule,
    attack_richest_rule,
    capture_with_reroute_rule,
    endgame_camp_rule,
];

/// Chain policy tuned for contested arenas: defends its mines, punishes
/// rich enemies, and camps out a won endgame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TacticalPolicy;

impl Policy for TacticalPolicy {
    fn name(&self) -> &'static str {
        "tactical"
    }

    fn decide(&self, snapshot: &GameSnapshot, memory: &mut AgentMemory) -> Decision {
        decide_with_chain(RULES, snapshot, memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, Direction};
    use crate::policy::testutil::snapshot_from;

    #[test]
    fn test_recharge_next_to_tavern() {
        let mut snap = snapshot_from(
            &[
                "@1[]      ",
                "          ",
                "          ",
                "          ",
                "        $-",
            ],
            0,
            100,
        );
        snap.hero.life = 50;
        snap.hero.gold = 5;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        assert_eq!(decision.action, Action::Heal);
        assert_eq!(decision.direction, Direction::East);
        assert_eq!(decision.path, vec![Coord::new(0, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_no_recharge_when_healthy() {
        let mut snap = snapshot_from(
            &[
                "@1[]      ",
                "          ",
                "          ",
                "          ",
                "        $-",
            ],
            0,
            100,
        );
        snap.hero.gold = 5;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        // Full life: fall through to the mine capture.
        assert_eq!(decision.action, Action::Mine);
    }

    #[test]
    fn test_defend_threatened_mine() {
        // Enemy 2 stands one step from our mine at (2,0).
        let mut snap = snapshot_from(
            &[
                "@1        ",
                "          ",
                "$1@2      ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        // Weak enough to lose the trade, strong enough to dodge the
        // opportunistic-kill rule.
        snap.enemies[0].life = 60;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        assert_eq!(decision.action, Action::Defend);
        assert_eq!(decision.direction, Direction::South);
    }

    #[test]
    fn test_attack_richest() {
        let mut snap = snapshot_from(
            &[
                "@1        ",
                "  @2      ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        snap.enemies[0].mine_count = 4;
        snap.enemies[0].life = 30;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        assert_eq!(decision.action, Action::Kill);
    }

    #[test]
    fn test_endgame_camp_when_leading() {
        let mut snap = snapshot_from(
            &[
                "@1        ",
                "          ",
                "    []    ",
                "          ",
                "@2        ",
            ],
            95,
            100,
        );
        snap.hero.mine_count = 3;
        snap.enemies[0].mine_count = 1;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        assert_eq!(decision.action, Action::Camp);
    }

    #[test]
    fn test_endgame_trailing_does_not_camp() {
        let mut snap = snapshot_from(
            &[
                "@1      $-",
                "          ",
                "    []    ",
                "          ",
                "@2        ",
            ],
            95,
            100,
        );
        snap.hero.mine_count = 0;
        snap.enemies[0].mine_count = 2;
        let mut memory = AgentMemory::new();
        let decision = TacticalPolicy.decide(&snap, &mut memory);
        // Not leading, 5 turns left: capture fails ROI too, so Hold.
        assert_eq!(decision.action, Action::Hold);
    }
}
