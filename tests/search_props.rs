//! Property-based tests for the BFS search core.
//!
//! Verifies shortest-path lengths against a brute-force reference on
//! small random grids, plus the no-path and ownership-exclusion
//! contracts.
//!
//! Run with: cargo test search_props

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use lode::search::{self, Obstacles};
use lode::{Board, CellKind, Coord};

/// Build a board from a wall bitmap, one bool per cell in scan order.
fn board_from_walls(size: u16, walls: &[bool]) -> Board {
    let mut tiles = String::with_capacity(walls.len() * 2);
    for &wall in walls {
        tiles.push_str(if wall { "##" } else { "  " });
    }
    Board::parse(&tiles, size).unwrap()
}

/// Brute-force shortest-path distance with the same stepping rules as
/// `to_coord` under `Strict`: walls block, the target is steppable.
fn reference_distance(board: &Board, start: Coord, target: Coord) -> Option<usize> {
    if board.get(start).is_none() {
        return None;
    }
    match board.get(target) {
        None | Some(CellKind::Wall) => return None,
        Some(_) => {}
    }

    let size = usize::from(board.size());
    let mut dist = vec![usize::MAX; size * size];
    let index = |c: Coord| usize::from(c.row) * size + usize::from(c.col);
    dist[index(start)] = 0;
    let mut frontier = vec![start];

    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for cell in frontier {
            if cell == target {
                return Some(dist[index(cell)]);
            }
            let (adjacent, count) = cell.adjacent(board.size());
            for &next in &adjacent[..count as usize] {
                let walkable = matches!(
                    board.get(next),
                    Some(CellKind::Open | CellKind::Spawn(_))
                ) || next == target;
                if walkable && dist[index(next)] == usize::MAX {
                    dist[index(next)] = dist[index(cell)] + 1;
                    next_frontier.push(next);
                }
            }
        }
        frontier = next_frontier;
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// `to_coord` agrees with the brute-force reference on both
    /// reachability and step count for every random 6x6 grid.
    #[test]
    fn prop_to_coord_matches_reference(
        walls in prop::collection::vec(prop::bool::weighted(0.35), 36),
        start_row in 0u16..6, start_col in 0u16..6,
        target_row in 0u16..6, target_col in 0u16..6,
    ) {
        let mut walls = walls;
        let start = Coord::new(start_row, start_col);
        let target = Coord::new(target_row, target_col);
        // The searcher stands on the start cell; never wall it in the bitmap.
        walls[usize::from(start_row) * 6 + usize::from(start_col)] = false;
        let board = board_from_walls(6, &walls);

        let result = search::to_coord(&board, start, target, Obstacles::Strict);
        let expected = reference_distance(&board, start, target);

        match expected {
            Some(steps) => {
                prop_assert!(result.found());
                prop_assert_eq!(result.steps(), steps);
            }
            None => prop_assert!(!result.found()),
        }
    }

    /// Every returned path is contiguous (unit steps), starts at the
    /// start, and ends at the target.
    #[test]
    fn prop_paths_are_contiguous(
        walls in prop::collection::vec(prop::bool::weighted(0.3), 36),
        start_row in 0u16..6, start_col in 0u16..6,
        target_row in 0u16..6, target_col in 0u16..6,
    ) {
        let mut walls = walls;
        let start = Coord::new(start_row, start_col);
        let target = Coord::new(target_row, target_col);
        walls[usize::from(start_row) * 6 + usize::from(start_col)] = false;
        let board = board_from_walls(6, &walls);

        let result = search::to_coord(&board, start, target, Obstacles::Strict);
        if result.found() {
            let path = result.path();
            prop_assert_eq!(path[0], start);
            prop_assert_eq!(*path.last().unwrap(), target);
            for pair in path.windows(2) {
                prop_assert_eq!(pair[0].manhattan(pair[1]), 1);
            }
        }
    }

    /// A nearest-unowned-mine search never lands on an owned mine.
    #[test]
    fn prop_owned_mines_excluded(
        owners in prop::collection::vec(prop::option::of(1u8..=4), 4),
        start_row in 1u16..5, start_col in 1u16..5,
    ) {
        // 6x6 open board with four mines in the corners, random owners.
        let mut tiles = vec!["  "; 36];
        let corners = [0usize, 5, 30, 35];
        let owner_codes = ["$-", "$1", "$2", "$3", "$4"];
        for (slot, owner) in corners.iter().zip(owners.iter()) {
            tiles[*slot] = owner.map_or("$-", |id| owner_codes[usize::from(id)]);
        }
        let board = Board::parse(&tiles.concat(), 6).unwrap();

        let me = 1u8;
        let result = search::nearest(
            &board,
            Coord::new(start_row, start_col),
            move |_, cell| matches!(cell, CellKind::Mine(owner) if owner != Some(me)),
            Obstacles::Strict,
        );
        if let Some(found) = result.target() {
            prop_assert_ne!(board.mine_owner(found), Some(Some(me)));
        }
    }
}

#[test]
fn test_no_path_determinism() {
    // Cell (2,2) sealed behind its four neighbours: both operations
    // report the no-path result.
    let mut walls = vec![false; 36];
    for &idx in &[8usize, 13, 15, 20] {
        walls[idx] = true;
    }
    let board = board_from_walls(6, &walls);
    let sealed = Coord::new(2, 2);

    let by_coord = search::to_coord(&board, Coord::new(0, 0), sealed, Obstacles::Strict);
    assert!(!by_coord.found());
    assert_eq!(by_coord.path(), &[] as &[Coord]);
    assert_eq!(by_coord.steps(), 0);

    let by_pred = search::nearest(
        &board,
        Coord::new(0, 0),
        |c, _| c == sealed,
        Obstacles::Strict,
    );
    assert!(!by_pred.found());
}
