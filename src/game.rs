//! Game state layer.
//!
//! Implements the typed view over one server snapshot:
//! - Board decoded from the packed 2-byte tile stream
//! - Heroes rebuilt fresh from JSON each turn
//! - Read-only projections for the decision policies
//! - Single-character rendering at the display boundary only

mod board;
mod hero;
mod render;
mod state;
mod wire;

pub use board::{Board, CellKind, Coord, Direction};
pub use hero::{Hero, HeroId};
pub use render::{board_lines, mark_owned, plot_path};
pub use state::GameSnapshot;
pub use wire::{BoardDto, GameDto, HeroDto, PosDto, StateDto};
