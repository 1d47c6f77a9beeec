//! Serde view of the server's state payload.
//!
//! These DTOs mirror the JSON shape verbatim; [`GameSnapshot`] conversion
//! and validation live in `state.rs`.
//!
//! [`GameSnapshot`]: crate::game::GameSnapshot

use serde::Deserialize;

use crate::error::ParseResult;
use crate::game::{Coord, HeroId};

/// A position as the server serializes it.
///
/// The server's `x` runs north-south and is therefore the ROW index;
/// `y` is the column. Do not "fix" this.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PosDto {
    /// Row index.
    pub x: u16,
    /// Column index.
    pub y: u16,
}

impl PosDto {
    /// Convert to a board coordinate.
    #[must_use]
    pub const fn coord(self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// One hero as the server serializes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDto {
    /// Stable numeric identity.
    pub id: HeroId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current position.
    pub pos: PosDto,
    /// Respawn position.
    pub spawn_pos: PosDto,
    /// Life in `[0, 100]`.
    pub life: u8,
    /// Accumulated gold.
    pub gold: u32,
    /// Number of owned mines.
    #[serde(default)]
    pub mine_count: u32,
    /// Whether the hero crashed (timed out).
    #[serde(default)]
    pub crashed: bool,
    /// Previous move label, if any.
    #[serde(default)]
    pub last_dir: Option<String>,
    /// Arena rating, absent for training bots.
    #[serde(default)]
    pub elo: Option<u32>,
}

/// The board as the server serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardDto {
    /// Side length of the square grid.
    pub size: u16,
    /// Packed tile stream of length `size² × 2`.
    pub tiles: String,
}

/// The game object inside a state payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    /// Server-assigned game identifier.
    pub id: String,
    /// Current turn counter.
    pub turn: u32,
    /// Turn limit for this game.
    pub max_turns: u32,
    /// Every hero in the game, self included.
    pub heroes: Vec<HeroDto>,
    /// The board.
    pub board: BoardDto,
    /// Whether the game has ended.
    pub finished: bool,
}

/// A full state payload: one of these arrives per turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDto {
    /// The game object.
    pub game: GameDto,
    /// The requesting bot's hero.
    pub hero: HeroDto,
    /// Session token, present on the first response.
    #[serde(default)]
    pub token: Option<String>,
    /// Spectator URL for this game.
    #[serde(default)]
    pub view_url: Option<String>,
    /// Move endpoint for this game.
    #[serde(default)]
    pub play_url: Option<String>,
}

impl StateDto {
    /// Parse a raw state payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`](crate::error::ParseError) if the payload
    /// is not JSON of the expected shape. Fatal for the turn.
    pub fn parse(raw: &str) -> ParseResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
