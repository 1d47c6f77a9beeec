//! Breadth-first shortest-path search over a board.
//!
//! Two operations, both guaranteeing shortest step count on the
//! unweighted 4-connected grid:
//! - [`nearest`]: path to the closest cell matching a predicate
//! - [`to_coord`]: path to one specific coordinate
//!
//! Both are parameterized by an [`Obstacles`] walkable policy. Every
//! call is a fresh O(size²) scan with no state shared across calls;
//! callers issuing repeated identical queries within one turn cache the
//! result (see the policy layer's rule context).
//!
//! "No path" is a first-class negative result, not an error.

use std::collections::VecDeque;

use crate::game::{Board, CellKind, Coord, Direction};

/// Result of one search: the coordinate sequence from start to target.
///
/// An empty sequence means no path was found; a single-element sequence
/// means the start already was the target. Callers must branch on
/// [`PathResult::found`] — a zero step count alone does not distinguish
/// the two cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResult {
    path: Vec<Coord>,
}

impl PathResult {
    /// The no-path result.
    #[must_use]
    pub const fn none() -> Self {
        Self { path: Vec::new() }
    }

    /// Build a result from an explicit coordinate sequence.
    ///
    /// For callers that derive a trivial path (e.g. one adjacent step)
    /// without running a search.
    #[must_use]
    pub fn from_path(path: Vec<Coord>) -> Self {
        Self { path }
    }

    /// Whether a path was found (the start-is-target case counts).
    #[must_use]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps (cells minus one); 0 for no-path and start-is-target.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The full coordinate sequence, start first.
    #[must_use]
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// The reached target, if a path was found.
    #[must_use]
    pub fn target(&self) -> Option<Coord> {
        self.path.last().copied()
    }

    /// Direction of the first step, `Stay` for empty or 1-element paths.
    #[must_use]
    pub fn first_step(&self) -> Direction {
        if self.path.len() < 2 {
            Direction::Stay
        } else {
            Direction::between(self.path[0], self.path[1])
        }
    }

    /// Consume into the coordinate sequence.
    #[must_use]
    pub fn into_path(self) -> Vec<Coord> {
        self.path
    }
}

/// Which cells block movement, besides walls (which always do).
///
/// One policy per call site, chosen by the rule issuing the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacles {
    /// Only open floor (including unoccupied spawn points) is walkable;
    /// mines, taverns and heroes all block. Routes around everything
    /// that is not the target.
    Strict,
    /// Like `Strict`, but other heroes' cells are walkable too, for
    /// paths that tolerate moving through contested squares.
    ThroughHeroes,
}

impl Obstacles {
    /// Whether a cell can be stepped through under this policy.
    #[must_use]
    pub fn walkable(self, cell: CellKind) -> bool {
        match cell {
            CellKind::Open | CellKind::Spawn(_) => true,
            CellKind::Hero(_) => self == Obstacles::ThroughHeroes,
            CellKind::Wall | CellKind::Mine(_) | CellKind::Tavern => false,
        }
    }
}

/// Shortest path from `start` to the nearest cell matching `is_target`.
///
/// A neighbor is enqueued iff it is walkable under `obstacles` OR is
/// itself a target — the target cell does not need to be walkable, so a
/// search for the nearest mine terminates ON the mine tile. The first
/// target dequeued wins; ties break deterministically in the fixed
/// north/south/west/east expansion order.
///
/// If `start` already matches, returns `([start], 0)` without expanding.
/// Out-of-bounds starts and exhausted searches return the no-path result.
#[must_use]
pub fn nearest(
    board: &Board,
    start: Coord,
    is_target: impl Fn(Coord, CellKind) -> bool,
    obstacles: Obstacles,
) -> PathResult {
    let Some(start_cell) = board.get(start) else {
        return PathResult::none();
    };
    if is_target(start, start_cell) {
        return PathResult::from_path(vec![start]);
    }
    bfs(board, start, &is_target, obstacles)
}

/// Shortest path from `start` to exactly `target`.
///
/// The target is treated as steppable even when its terrain fails
/// `obstacles` — except a Wall target, which is impassable and yields
/// no-path. `start == target` returns `([start], 0)`.
#[must_use]
pub fn to_coord(
    board: &Board,
    start: Coord,
    target: Coord,
    obstacles: Obstacles,
) -> PathResult {
    if board.get(start).is_none() {
        return PathResult::none();
    }
    match board.get(target) {
        None | Some(CellKind::Wall) => return PathResult::none(),
        Some(_) => {}
    }
    if start == target {
        return PathResult::from_path(vec![start]);
    }
    bfs(board, start, &|c, _| c == target, obstacles)
}

/// Shared BFS: parent-map search with an index-based visited set.
///
/// The goal test runs at dequeue time; enqueue admits walkable cells and
/// target cells. The start cell is expanded regardless of its own
/// walkability (the searcher stands on it).
fn bfs(
    board: &Board,
    start: Coord,
    is_goal: &dyn Fn(Coord, CellKind) -> bool,
    obstacles: Obstacles,
) -> PathResult {
    let size = board.size();
    let cells = usize::from(size) * usize::from(size);
    let mut parent: Vec<Option<Coord>> = vec![None; cells];
    let mut queue = VecDeque::new();

    parent[cell_index(size, start)] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(cell) = board.get(current) else {
            continue;
        };
        if is_goal(current, cell) {
            return reconstruct(size, &parent, start, current);
        }

        let (adjacent, count) = current.adjacent(size);
        for &next in &adjacent[..count as usize] {
            let idx = cell_index(size, next);
            if parent[idx].is_some() {
                continue;
            }
            let Some(next_cell) = board.get(next) else {
                continue;
            };
            if obstacles.walkable(next_cell) || is_goal(next, next_cell) {
                parent[idx] = Some(current);
                queue.push_back(next);
            }
        }
    }

    PathResult::none()
}

/// Row-major index of a coordinate.
fn cell_index(size: u16, coord: Coord) -> usize {
    usize::from(coord.row) * usize::from(size) + usize::from(coord.col)
}

/// Walk the parent map back from `goal` to `start`.
fn reconstruct(size: u16, parent: &[Option<Coord>], start: Coord, goal: Coord) -> PathResult {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parent[cell_index(size, current)] {
            Some(prev) => current = prev,
            None => return PathResult::none(),
        }
        path.push(current);
    }
    path.reverse();
    PathResult::from_path(path)
}
