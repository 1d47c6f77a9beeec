//! Hero state.

use crate::game::{Coord, Direction};

/// Unique identifier for a hero.
///
/// This is the server's stable numeric identity, never an array index.
pub type HeroId = u8;

/// State for a single hero (self or enemy), rebuilt fresh each snapshot.
///
/// Nothing here persists across turns; per-agent memory lives in the
/// policy layer's [`AgentMemory`](crate::policy::AgentMemory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    /// Stable numeric identity.
    pub id: HeroId,
    /// Display name from the server.
    pub name: String,
    /// Current position.
    pub pos: Coord,
    /// Respawn position.
    pub spawn: Coord,
    /// Life in `[0, 100]`.
    pub life: u8,
    /// Accumulated gold.
    pub gold: u32,
    /// Number of mines currently owned (server's count).
    pub mine_count: u32,
    /// Positions of owned mines, derived from board ownership.
    pub mines: Vec<Coord>,
    /// Direction of the previous move, when the server reported one.
    pub last_dir: Option<Direction>,
    /// Whether the server flagged this hero as crashed (timed out).
    pub crashed: bool,
    /// Arena rating, absent for training bots.
    pub elo: Option<u32>,
}

impl Hero {
    /// Create a hero at a position with full life and no possessions.
    ///
    /// Handy for fixtures; wire parsing fills every field from JSON.
    #[must_use]
    pub fn at(id: HeroId, pos: Coord) -> Self {
        Self {
            id,
            name: format!("hero{id}"),
            pos,
            spawn: pos,
            life: 100,
            gold: 0,
            mine_count: 0,
            mines: Vec::new(),
            last_dir: None,
            crashed: false,
            elo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_at_defaults() {
        let hero = Hero::at(3, Coord::new(2, 4));
        assert_eq!(hero.id, 3);
        assert_eq!(hero.pos, Coord::new(2, 4));
        assert_eq!(hero.spawn, Coord::new(2, 4));
        assert_eq!(hero.life, 100);
        assert_eq!(hero.gold, 0);
        assert!(hero.mines.is_empty());
        assert!(!hero.crashed);
    }
}
