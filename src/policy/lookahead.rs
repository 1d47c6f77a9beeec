//! Bounded look-ahead policy over a cloned-snapshot simulation.
//!
//! The simulation is a best-effort local approximation of the server's
//! rules (move, mine capture, tavern heal, mine income, thirst, one
//! adjacent strike). It may diverge from true server semantics — the
//! server stays authoritative; this only ranks candidate moves.
//!
//! All exploration is explicitly bounded by depth, branching, and a
//! node budget. Exhausting any bound returns best-so-far, never
//! unbounded recursion, which keeps the time-boxed turn contract.

use crate::game::{CellKind, Direction, GameSnapshot};
use crate::policy::memory::AgentMemory;
use crate::policy::rules::{Action, Decision};
use crate::policy::{MINE_INCOME, MINE_TAKE_COST, Policy, TAVERN_HEAL, TAVERN_PRICE, THIRST};

/// Bounds for the look-ahead search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadConfig {
    /// How many simulated turns deep to explore.
    pub max_depth: u8,
    /// How many candidate moves survive ranking at each level.
    pub max_branching: usize,
    /// Total simulation-node budget per decision.
    pub node_budget: u32,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_branching: 3,
            node_budget: 600,
        }
    }
}

/// All five candidate moves, in deterministic tie-break order.
const CANDIDATES: [Direction; 5] = [
    Direction::Stay,
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Simulate one of our moves on an owned copy of the snapshot.
///
/// Pure with respect to its input: the canonical snapshot is never
/// touched. Approximated effects, in order: the step itself (blocked
/// steps become Stay), mine capture with its life cost and possible
/// death, tavern heal, one strike against an adjacent enemy, mine
/// income, thirst.
#[must_use]
pub fn simulate(snapshot: &GameSnapshot, dir: Direction) -> GameSnapshot {
    let mut next = snapshot.clone();
    let size = next.board.size();
    let me = next.hero.id;

    let target = dir
        .step(next.hero.pos, size)
        .filter(|&t| t != next.hero.pos);
    if let Some(target) = target {
        match next.board.get(target) {
            Some(CellKind::Open | CellKind::Spawn(_)) => {
                next.board.set(next.hero.pos, CellKind::Open);
                next.board.set(target, CellKind::Hero(me));
                next.hero.pos = target;
            }
            Some(CellKind::Mine(owner)) if owner != Some(me) => {
                if next.hero.life > MINE_TAKE_COST {
                    next.hero.life -= MINE_TAKE_COST;
                    next.board.set(target, CellKind::Mine(Some(me)));
                    next.hero.mines.push(target);
                    next.hero.mine_count += 1;
                } else {
                    respawn_hero(&mut next);
                }
            }
            Some(CellKind::Tavern) => {
                if next.hero.gold >= TAVERN_PRICE {
                    next.hero.gold -= TAVERN_PRICE;
                    next.hero.life = next.hero.life.saturating_add(TAVERN_HEAL).min(100);
                }
            }
            Some(CellKind::Hero(id)) if id != me => {
                if let Some(enemy) = next.enemies.iter_mut().find(|e| e.id == id) {
                    enemy.life = enemy.life.saturating_sub(20);
                }
            }
            // Walls, own mines, own cell, off-board: the move fizzles.
            _ => {}
        }
    }

    next.hero.gold += next.hero.mine_count * MINE_INCOME;
    next.hero.life = next.hero.life.saturating_sub(THIRST).max(1);
    next.turn += 1;
    next
}

/// Send the hero home after a fatal mine attempt, releasing its mines.
fn respawn_hero(snap: &mut GameSnapshot) {
    let me = snap.hero.id;
    for &mine in &snap.hero.mines {
        snap.board.set(mine, CellKind::Mine(None));
    }
    snap.hero.mines.clear();
    snap.hero.mine_count = 0;
    snap.board.set(snap.hero.pos, CellKind::Open);
    snap.hero.pos = snap.hero.spawn;
    snap.board.set(snap.hero.spawn, CellKind::Hero(me));
    snap.hero.life = 100;
}

/// Score a simulated snapshot for the self hero. Gold plus projected
/// mine income, adjusted for life posture and nearby enemies.
fn score(snap: &GameSnapshot) -> f64 {
    let hero = &snap.hero;
    let remaining = f64::from(snap.remaining_turns());
    let mut value = f64::from(hero.gold) + f64::from(hero.mine_count) * remaining;

    if hero.life <= 20 {
        value -= (f64::from(20 - hero.life) / 5.0).exp() * 10.0;
    } else {
        value += 5.0;
    }

    for enemy in snap.enemies() {
        if hero.life > enemy.life.saturating_add(10) {
            value += 5.0;
        } else if enemy.life > hero.life.saturating_add(10) {
            value -= 5.0;
        }
        if enemy.life < 30 && hero.pos.manhattan(enemy.pos) < 3 {
            value += 3.0;
        }
    }

    value
}

/// Depth-limited exploration; decrements the shared node budget and
/// returns the best reachable score, or best-so-far when a bound trips.
fn explore(snap: &GameSnapshot, depth: u8, config: &LookaheadConfig, budget: &mut u32) -> f64 {
    let here = score(snap);
    if depth == 0 || *budget == 0 || snap.turn >= snap.max_turns {
        return here;
    }

    let mut ranked: Vec<(f64, GameSnapshot)> = CANDIDATES
        .iter()
        .map(|&dir| {
            *budget = budget.saturating_sub(1);
            let sim = simulate(snap, dir);
            (score(&sim), sim)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.max_branching);

    ranked
        .into_iter()
        .map(|(_, sim)| explore(&sim, depth - 1, config, budget))
        .fold(here, f64::max)
}

/// Policy that ranks the five candidate moves by bounded simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookaheadPolicy {
    /// Search bounds.
    pub config: LookaheadConfig,
}

impl LookaheadPolicy {
    /// Build with explicit bounds.
    #[must_use]
    pub const fn new(config: LookaheadConfig) -> Self {
        Self { config }
    }

    /// Label the chosen step by what it walks into.
    fn action_for(snap: &GameSnapshot, dir: Direction) -> Action {
        let me = snap.hero.id;
        match dir
            .step(snap.hero.pos, snap.board.size())
            .and_then(|t| snap.board.get(t))
        {
            Some(CellKind::Mine(owner)) if owner != Some(me) => Action::Mine,
            Some(CellKind::Tavern) => Action::Heal,
            Some(CellKind::Hero(id)) if id != me => Action::Kill,
            _ => Action::Hold,
        }
    }
}

impl Policy for LookaheadPolicy {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn decide(&self, snapshot: &GameSnapshot, memory: &mut AgentMemory) -> Decision {
        let respawned = memory.respawn_detected(snapshot.hero.life);
        if respawned {
            memory.reset();
        }

        if snapshot.finished || !snapshot.board.in_bounds(snapshot.hero.pos) {
            let decision = Decision::hold(snapshot.hero.pos);
            memory.observe(snapshot.hero.life, snapshot.hero.pos, None);
            return decision;
        }

        let mut budget = self.config.node_budget;
        let mut best: (f64, Direction) = (f64::NEG_INFINITY, Direction::Stay);
        for dir in CANDIDATES {
            budget = budget.saturating_sub(1);
            let sim = simulate(snapshot, dir);
            let mut value = explore(
                &sim,
                self.config.max_depth.saturating_sub(1),
                &self.config,
                &mut budget,
            );
            // Nudge toward last turn's target to damp thrashing between
            // equally scored moves.
            if let Some(prev) = memory.prev_target()
                && sim.hero.pos.manhattan(prev) < snapshot.hero.pos.manhattan(prev)
            {
                value += 0.5;
            }
            if value > best.0 {
                best = (value, dir);
            }
        }

        let (_, dir) = best;
        let action = Self::action_for(snapshot, dir);
        let path = match dir.step(snapshot.hero.pos, snapshot.board.size()) {
            Some(target) if dir != Direction::Stay => vec![snapshot.hero.pos, target],
            _ => vec![snapshot.hero.pos],
        };
        let decision = Decision {
            action,
            direction: dir,
            path,
        };
        memory.observe(
            snapshot.hero.life,
            snapshot.hero.pos,
            decision.path.last().copied(),
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Coord;
    use crate::policy::testutil::snapshot_from;

    const MINE: Coord = Coord::new(0, 1);

    #[test]
    fn test_simulate_is_pure() {
        let snap = snapshot_from(
            &[
                "@1$-      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        let before = snap.clone();
        let _ = simulate(&snap, Direction::East);
        assert_eq!(snap.hero.pos, before.hero.pos);
        assert_eq!(snap.hero.mines, before.hero.mines);
        assert_eq!(snap.board.mine_owner(MINE), before.board.mine_owner(MINE));
    }

    #[test]
    fn test_simulate_mine_capture() {
        let snap = snapshot_from(
            &[
                "@1$-      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        let next = simulate(&snap, Direction::East);
        assert_eq!(next.board.mine_owner(MINE), Some(Some(1)));
        assert_eq!(next.hero.mine_count, 1);
        // 20 for the mine, 1 thirst, plus one turn of income.
        assert_eq!(next.hero.life, 79);
        assert_eq!(next.hero.gold, 1);
        // Capturing does not move the hero.
        assert_eq!(next.hero.pos, snap.hero.pos);
    }

    #[test]
    fn test_simulate_fatal_mine_respawns() {
        let mut snap = snapshot_from(
            &[
                "@1$-      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        snap.hero.life = 15;
        snap.hero.spawn = Coord::new(4, 4);
        let next = simulate(&snap, Direction::East);
        assert_eq!(next.hero.pos, Coord::new(4, 4));
        assert_eq!(next.board.mine_owner(MINE), Some(None));
        assert_eq!(next.hero.mine_count, 0);
    }

    #[test]
    fn test_simulate_tavern_heal() {
        let mut snap = snapshot_from(
            &[
                "@1[]      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        snap.hero.life = 40;
        snap.hero.gold = 10;
        let next = simulate(&snap, Direction::East);
        assert_eq!(next.hero.gold, 8);
        // +50 heal, -1 thirst.
        assert_eq!(next.hero.life, 89);
    }

    #[test]
    fn test_simulate_wall_fizzles() {
        let snap = snapshot_from(
            &[
                "@1##      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        let next = simulate(&snap, Direction::East);
        assert_eq!(next.hero.pos, snap.hero.pos);
        assert_eq!(next.hero.life, 99);
    }

    #[test]
    fn test_lookahead_grabs_adjacent_mine() {
        let snap = snapshot_from(
            &[
                "@1$-      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        let mut memory = AgentMemory::new();
        let decision = LookaheadPolicy::default().decide(&snap, &mut memory);
        assert_eq!(decision.direction, Direction::East);
        assert_eq!(decision.action, Action::Mine);
    }

    #[test]
    fn test_lookahead_always_returns_valid_direction() {
        // Hero boxed in by walls: every move fizzles, Stay is chosen.
        let snap = snapshot_from(
            &[
                "@1##      ",
                "####      ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        let mut memory = AgentMemory::new();
        let decision = LookaheadPolicy::default().decide(&snap, &mut memory);
        assert_eq!(decision.direction, Direction::Stay);
    }

    #[test]
    fn test_lookahead_respects_node_budget() {
        let snap = snapshot_from(
            &[
                "@1        ",
                "          ",
                "          ",
                "    $-    ",
                "          ",
            ],
            0,
            100,
        );
        let tight = LookaheadPolicy::new(LookaheadConfig {
            max_depth: 10,
            max_branching: 5,
            node_budget: 10,
        });
        let mut memory = AgentMemory::new();
        // Must terminate promptly and still answer.
        let decision = tight.decide(&snap, &mut memory);
        assert!(matches!(
            decision.direction,
            Direction::Stay
                | Direction::North
                | Direction::South
                | Direction::East
                | Direction::West
        ));
    }

    #[test]
    fn test_finished_game_holds() {
        let mut snap = snapshot_from(
            &[
                "@1$-      ",
                "          ",
                "          ",
                "          ",
                "          ",
            ],
            0,
            100,
        );
        snap.finished = true;
        let mut memory = AgentMemory::new();
        let decision = LookaheadPolicy::default().decide(&snap, &mut memory);
        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.direction, Direction::Stay);
    }
}
