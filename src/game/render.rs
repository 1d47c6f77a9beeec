//! Display-boundary rendering.
//!
//! The single-character board encoding lives here and only here; search
//! and policy code compare typed cells. Consumers: logging, the replay
//! command, and tests that check layout round-trips.
//!
//! Encoding: `#` wall, `$` mine, `T` tavern, `@` self hero, `H` other
//! hero, `X` unoccupied spawn point, ` ` open floor. Overlays add `O`
//! for owned mines and `?`/`*` for plotted paths.

use crate::game::{Board, CellKind, Coord, HeroId};

/// Render a board to one string per row.
#[must_use]
pub fn board_lines(board: &Board, self_id: HeroId) -> Vec<String> {
    let size = usize::from(board.size());
    let mut lines = Vec::with_capacity(size);
    let mut line = String::with_capacity(size);
    for (coord, cell) in board.iter() {
        let ch = match cell {
            CellKind::Open => ' ',
            CellKind::Wall => '#',
            CellKind::Mine(_) => '$',
            CellKind::Tavern => 'T',
            CellKind::Hero(id) if id == self_id => '@',
            CellKind::Hero(_) => 'H',
            CellKind::Spawn(_) => 'X',
        };
        line.push(ch);
        if usize::from(coord.col) == size - 1 {
            lines.push(std::mem::take(&mut line));
        }
    }
    lines
}

/// Rewrite the given positions to a marker character.
///
/// Used to make the self hero's owned mines visually distinct (`O`) so
/// a rendered grid shows which `$` cells searches will skip.
/// Out-of-bounds positions are ignored.
#[must_use]
pub fn mark_owned(lines: &[String], positions: &[Coord], marker: char) -> Vec<String> {
    let mut grid: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
    for &pos in positions {
        if let Some(row) = grid.get_mut(usize::from(pos.row))
            && let Some(cell) = row.get_mut(usize::from(pos.col))
        {
            *cell = marker;
        }
    }
    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Overlay a path onto a rendered grid.
///
/// Intermediate cells become `?` and the destination `*`; the starting
/// cell keeps its own marker. Empty and single-cell paths change nothing.
#[must_use]
pub fn plot_path(lines: &[String], path: &[Coord]) -> Vec<String> {
    if path.len() < 2 {
        return lines.to_vec();
    }
    let mut grid = mark_owned(lines, &path[1..path.len() - 1], '?');
    if let Some(&dest) = path.last() {
        grid = mark_owned(&grid, &[dest], '*');
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        // 3x3: wall, unowned mine, tavern, hero 1, hero 2.
        Board::parse(concat!("  ##[]", "$-@1  ", "    @2"), 3).unwrap()
    }

    #[test]
    fn test_board_lines_encoding() {
        let lines = board_lines(&board(), 1);
        assert_eq!(lines, vec![" #T", "$@ ", "  H"]);
    }

    #[test]
    fn test_board_lines_other_perspective() {
        let lines = board_lines(&board(), 2);
        assert_eq!(lines, vec![" #T", "$H ", "  @"]);
    }

    #[test]
    fn test_render_round_trip() {
        // Re-rendering the parse of a hero-free layout reproduces it,
        // with taverns shown as T.
        let tiles = concat!("  ##  ", "$-    ", "  []  ");
        let parsed = Board::parse(tiles, 3).unwrap();
        let lines = board_lines(&parsed, 1);
        assert_eq!(lines, vec![" # ", "$  ", " T "]);
    }

    #[test]
    fn test_mark_owned() {
        let lines = board_lines(&board(), 1);
        let marked = mark_owned(&lines, &[Coord::new(1, 0)], 'O');
        assert_eq!(marked[1], "O@ ");
        // Original grid untouched.
        assert_eq!(lines[1], "$@ ");
    }

    #[test]
    fn test_plot_path() {
        let lines = board_lines(&board(), 1);
        let path = [Coord::new(1, 1), Coord::new(1, 2), Coord::new(2, 2)];
        let plotted = plot_path(&lines, &path);
        assert_eq!(plotted[1], "$@?");
        assert_eq!(plotted[2], "  *");
    }

    #[test]
    fn test_plot_path_trivial() {
        let lines = board_lines(&board(), 1);
        assert_eq!(plot_path(&lines, &[]), lines);
        assert_eq!(plot_path(&lines, &[Coord::new(1, 1)]), lines);
    }
}
