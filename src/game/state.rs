//! Snapshot model: one fully parsed turn and its projections.

use crate::error::{ParseError, ParseResult};
use crate::game::{Board, CellKind, Coord, Direction, Hero, HeroDto, HeroId, StateDto};

/// Typed view over one turn's server payload.
///
/// Constructed once per turn and immutable thereafter; every projection
/// is read-only and every search call reads the same snapshot. Lookahead
/// re-simulation operates on owned clones, never on the canonical
/// snapshot.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    /// Server-assigned game identifier.
    pub game_id: String,
    /// Current turn counter, `0 <= turn <= max_turns`.
    pub turn: u32,
    /// Turn limit for this game.
    pub max_turns: u32,
    /// Whether the game has ended; no move is requested once set.
    pub finished: bool,
    /// The parsed board with spawn overlay applied.
    pub board: Board,
    /// The requesting bot's hero.
    pub hero: Hero,
    /// Every other hero in the game.
    pub enemies: Vec<Hero>,
}

impl GameSnapshot {
    /// Build a snapshot from a parsed state payload.
    ///
    /// Parses the tile stream, overlays spawn points from the heroes
    /// list, fills each hero's owned-mine positions from board
    /// ownership, and splits self from enemies by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the tile stream is malformed or a hero
    /// position lies outside the board. Fatal for the turn.
    pub fn from_state(dto: &StateDto) -> ParseResult<Self> {
        let mut board = Board::parse(&dto.game.board.tiles, dto.game.board.size)?;

        let spawns: Vec<(Coord, HeroId)> = dto
            .game
            .heroes
            .iter()
            .map(|h| (h.spawn_pos.coord(), h.id))
            .collect();
        board.overlay_spawns(&spawns);

        let hero = hero_from_dto(&board, &dto.hero)?;
        let mut enemies = Vec::with_capacity(dto.game.heroes.len().saturating_sub(1));
        for h in &dto.game.heroes {
            if h.id != dto.hero.id {
                enemies.push(hero_from_dto(&board, h)?);
            }
        }

        Ok(Self {
            game_id: dto.game.id.clone(),
            turn: dto.game.turn,
            max_turns: dto.game.max_turns,
            finished: dto.game.finished,
            board,
            hero,
            enemies,
        })
    }

    /// Turns left before the game ends.
    #[must_use]
    pub const fn remaining_turns(&self) -> u32 {
        self.max_turns.saturating_sub(self.turn)
    }

    /// All mine positions on the board, in scan order.
    #[must_use]
    pub fn mines(&self) -> &[Coord] {
        self.board.mines()
    }

    /// All tavern positions on the board, in scan order.
    #[must_use]
    pub fn taverns(&self) -> &[Coord] {
        self.board.taverns()
    }

    /// All heroes whose id differs from the self hero's.
    #[must_use]
    pub fn enemies(&self) -> &[Hero] {
        &self.enemies
    }

    /// Positions of mines owned by the self hero.
    #[must_use]
    pub fn owned_mines(&self) -> &[Coord] {
        &self.hero.mines
    }

    /// Mine positions not owned by the self hero, in scan order.
    pub fn unowned_mines(&self) -> impl Iterator<Item = Coord> + '_ {
        let me = self.hero.id;
        self.board
            .mines()
            .iter()
            .copied()
            .filter(move |&m| self.board.mine_owner(m) != Some(Some(me)))
    }

    /// The enemy standing on the given cell, if any.
    ///
    /// An enemy id present on a tile but absent from the enemies list is
    /// reported as `None`; rules treat that as "target not found".
    #[must_use]
    pub fn enemy_at(&self, coord: Coord) -> Option<&Hero> {
        match self.board.get(coord) {
            Some(CellKind::Hero(id)) if id != self.hero.id => {
                self.enemies.iter().find(|e| e.id == id)
            }
            _ => None,
        }
    }
}

/// Build a typed hero from its DTO, validating its position.
fn hero_from_dto(board: &Board, dto: &HeroDto) -> Result<Hero, ParseError> {
    let pos = dto.pos.coord();
    if !board.in_bounds(pos) {
        return Err(ParseError::HeroOutOfBounds {
            id: dto.id,
            row: pos.row,
            col: pos.col,
        });
    }
    Ok(Hero {
        id: dto.id,
        name: dto.name.clone(),
        pos,
        spawn: dto.spawn_pos.coord(),
        life: dto.life,
        gold: dto.gold,
        mine_count: dto.mine_count,
        mines: board.mines_owned_by(dto.id),
        last_dir: dto.last_dir.as_deref().and_then(Direction::from_label),
        crashed: dto.crashed,
        elo: dto.elo,
    })
}
