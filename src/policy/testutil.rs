//! Shared fixtures for policy tests.

use crate::game::{Board, CellKind, GameSnapshot, Hero};

/// Build a snapshot from token rows, taking hero 1 as self.
///
/// Heroes found on the board become full-life, zero-gold heroes whose
/// owned-mine lists are filled from board ownership; tests tweak fields
/// afterwards as needed.
pub(crate) fn snapshot_from(rows: &[&str], turn: u32, max_turns: u32) -> GameSnapshot {
    let size = u16::try_from(rows.len()).expect("row count fits u16");
    let tiles: String = rows.concat();
    let board = Board::parse(&tiles, size).expect("valid fixture tiles");

    let mut hero = None;
    let mut enemies = Vec::new();
    for (coord, cell) in board.iter() {
        if let CellKind::Hero(id) = cell {
            let mut h = Hero::at(id, coord);
            h.mines = board.mines_owned_by(id);
            h.mine_count = u32::try_from(h.mines.len()).expect("mine count fits u32");
            if id == 1 {
                hero = Some(h);
            } else {
                enemies.push(h);
            }
        }
    }

    GameSnapshot {
        game_id: "fixture".to_string(),
        turn,
        max_turns,
        finished: false,
        board,
        hero: hero.expect("fixture must contain hero 1"),
        enemies,
    }
}
