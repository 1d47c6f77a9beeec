//! Board model: coordinates, cells, directions, and tile decoding.

use crate::error::ParseError;
use crate::game::HeroId;

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index (grows southward).
    pub row: u16,
    /// Column index (grows eastward).
    pub col: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Get adjacent coordinates in north, south, west, east order.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count. The
    /// fixed order makes BFS tie-breaking deterministic.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, size: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.row > 0 {
            result[count as usize] = Coord::new(self.row - 1, self.col); // north
            count += 1;
        }
        if self.row + 1 < size {
            result[count as usize] = Coord::new(self.row + 1, self.col); // south
            count += 1;
        }
        if self.col > 0 {
            result[count as usize] = Coord::new(self.row, self.col - 1); // west
            count += 1;
        }
        if self.col + 1 < size {
            result[count as usize] = Coord::new(self.row, self.col + 1); // east
            count += 1;
        }

        (result, count)
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

/// One of the five move labels accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Do not move.
    #[default]
    Stay,
    /// Decrease row.
    North,
    /// Increase row.
    South,
    /// Increase column.
    East,
    /// Decrease column.
    West,
}

impl Direction {
    /// The wire label sent to the server's move endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Stay => "Stay",
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }

    /// Parse a wire label (e.g. the server's `lastDir` field).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Stay" => Some(Direction::Stay),
            "North" => Some(Direction::North),
            "South" => Some(Direction::South),
            "East" => Some(Direction::East),
            "West" => Some(Direction::West),
            _ => None,
        }
    }

    /// Direction of the step from `from` to `to`, judged by row/col delta.
    ///
    /// Identical coordinates (or a degenerate diagonal) map to `Stay`.
    #[must_use]
    pub fn between(from: Coord, to: Coord) -> Self {
        if to.row < from.row {
            Direction::North
        } else if to.row > from.row {
            Direction::South
        } else if to.col < from.col {
            Direction::West
        } else if to.col > from.col {
            Direction::East
        } else {
            Direction::Stay
        }
    }

    /// Apply this direction to a coordinate, staying inside a board of
    /// the given size. Off-board steps return `None`.
    #[must_use]
    pub fn step(self, from: Coord, size: u16) -> Option<Coord> {
        match self {
            Direction::Stay => Some(from),
            Direction::North => from.row.checked_sub(1).map(|r| Coord::new(r, from.col)),
            Direction::South => {
                (from.row + 1 < size).then(|| Coord::new(from.row + 1, from.col))
            }
            Direction::West => from.col.checked_sub(1).map(|c| Coord::new(from.row, c)),
            Direction::East => {
                (from.col + 1 < size).then(|| Coord::new(from.row, from.col + 1))
            }
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Walkable floor.
    Open,
    /// Permanently impassable terrain.
    Wall,
    /// A gold mine and its current owner (`None` = unowned).
    Mine(Option<HeroId>),
    /// A tavern where life can be bought.
    Tavern,
    /// A cell occupied by the hero with this id.
    Hero(HeroId),
    /// An unoccupied spawn point belonging to the hero with this id.
    Spawn(HeroId),
}

impl CellKind {
    /// Check whether this cell is a wall.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall)
    }

    /// Check whether this cell is a mine (owned or not).
    #[must_use]
    pub const fn is_mine(self) -> bool {
        matches!(self, CellKind::Mine(_))
    }

    /// Owner of the mine on this cell, if the cell is a mine.
    #[must_use]
    pub const fn mine_owner(self) -> Option<Option<HeroId>> {
        match self {
            CellKind::Mine(owner) => Some(owner),
            _ => None,
        }
    }
}

/// The game board for one snapshot.
///
/// Built once per turn from the full server payload and immutable for
/// the rest of that turn; every search call reads the same snapshot.
#[derive(Debug, Clone)]
pub struct Board {
    /// Side length of the square grid.
    size: u16,
    /// Cells in row-major order.
    cells: Vec<CellKind>,
    /// Wall positions in scan order.
    walls: Vec<Coord>,
    /// Mine positions in scan order (ownership lives on the cells).
    mines: Vec<Coord>,
    /// Tavern positions in scan order.
    taverns: Vec<Coord>,
}

impl Board {
    /// Decode the server's packed tile stream.
    ///
    /// Each cell is a 2-byte token in row-major order: the terrain code
    /// (` `, `#`, `$`, `[`, `@`) followed by a detail code (mine owner
    /// digit or `-`, hero id digit, or filler).
    ///
    /// # Errors
    ///
    /// Returns an error if the stream length is not `size² × 2` or any
    /// token is malformed. A short or garbled stream is never guessed at.
    pub fn parse(tiles: &str, size: u16) -> Result<Self, ParseError> {
        let bytes = tiles.as_bytes();
        let expected = usize::from(size) * usize::from(size) * 2;
        if bytes.len() != expected {
            return Err(ParseError::TileStreamLength {
                expected,
                actual: bytes.len(),
            });
        }

        let mut cells = Vec::with_capacity(usize::from(size) * usize::from(size));
        let mut walls = Vec::new();
        let mut mines = Vec::new();
        let mut taverns = Vec::new();

        let mut row: u16 = 0;
        let mut col: u16 = 0;
        for (index, token) in bytes.chunks_exact(2).enumerate() {
            let coord = Coord::new(row, col);
            let cell = match token[0] {
                b' ' => CellKind::Open,
                b'#' => {
                    walls.push(coord);
                    CellKind::Wall
                }
                b'$' => {
                    mines.push(coord);
                    let owner = match token[1] {
                        b'-' => None,
                        d @ b'0'..=b'9' => Some(d - b'0'),
                        other => {
                            return Err(ParseError::MineOwner {
                                code: other as char,
                                index,
                            });
                        }
                    };
                    CellKind::Mine(owner)
                }
                b'[' => {
                    taverns.push(coord);
                    CellKind::Tavern
                }
                b'@' => match token[1] {
                    d @ b'0'..=b'9' => CellKind::Hero(d - b'0'),
                    other => {
                        return Err(ParseError::HeroTile {
                            code: other as char,
                            index,
                        });
                    }
                },
                other => {
                    return Err(ParseError::UnknownTile {
                        code: other as char,
                        index,
                    });
                }
            };
            cells.push(cell);

            col += 1;
            if col == size {
                col = 0;
                row += 1;
            }
        }

        Ok(Self {
            size,
            cells,
            walls,
            mines,
            taverns,
        })
    }

    /// Side length of the square grid.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Convert a coordinate to an index into the cells array.
    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.row) * usize::from(self.size) + usize::from(coord.col))
        } else {
            None
        }
    }

    /// Cell contents at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<CellKind> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Replace the cell at the given coordinate.
    ///
    /// Only local re-simulation mutates a board, and always on a clone;
    /// the turn's canonical board stays frozen.
    pub(crate) fn set(&mut self, coord: Coord, cell: CellKind) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = cell;
        }
    }

    /// Overlay spawn points from the heroes list.
    ///
    /// Spawn points are not part of the tile stream. An `Open` cell at a
    /// spawn position becomes `Spawn(id)`; a cell occupied by a hero (or
    /// anything else) is never overwritten.
    pub fn overlay_spawns(&mut self, spawns: &[(Coord, HeroId)]) {
        for &(coord, id) in spawns {
            if self.get(coord) == Some(CellKind::Open) {
                self.set(coord, CellKind::Spawn(id));
            }
        }
    }

    /// Wall positions in scan order.
    #[must_use]
    pub fn walls(&self) -> &[Coord] {
        &self.walls
    }

    /// Mine positions in scan order.
    #[must_use]
    pub fn mines(&self) -> &[Coord] {
        &self.mines
    }

    /// Tavern positions in scan order.
    #[must_use]
    pub fn taverns(&self) -> &[Coord] {
        &self.taverns
    }

    /// Owner of the mine at `coord` (`None` if the cell is not a mine).
    #[must_use]
    pub fn mine_owner(&self, coord: Coord) -> Option<Option<HeroId>> {
        self.get(coord).and_then(CellKind::mine_owner)
    }

    /// Positions of all mines currently owned by the given hero.
    #[must_use]
    pub fn mines_owned_by(&self, id: HeroId) -> Vec<Coord> {
        self.mines
            .iter()
            .copied()
            .filter(|&m| self.mine_owner(m) == Some(Some(id)))
            .collect()
    }

    /// Iterate over all coordinates and cells in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
            .zip(self.cells.iter().copied())
    }
}
