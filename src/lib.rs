// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Lode: a pathfinding bot client for grid-arena mining games.
//!
//! This crate plays a turn-based, grid-world multiplayer game over an
//! HTTP API: each turn it fetches a JSON snapshot, parses the packed
//! tile encoding into a typed board, runs breadth-first path searches
//! under explicit obstacle policies, and picks one of five directions
//! through a priority-ordered decision procedure — all inside the
//! server's per-move time budget.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn Driver (client, tournament)  │
//! ├─────────────────────────────────────┤
//! │       Decision Policies             │
//! ├─────────────────────────────────────┤
//! │       Grid Search (BFS)             │
//! ├─────────────────────────────────────┤
//! │   Board / Snapshot Model (game)     │
//! └─────────────────────────────────────┘
//! ```

pub mod client;
pub mod error;
pub mod game;
pub mod policy;
pub mod search;
pub mod tournament;

pub use error::{ParseError, ParseResult};

// Re-export key types at crate root for convenience
pub use game::{Board, CellKind, Coord, Direction, GameSnapshot, Hero, HeroId};
pub use policy::{Action, AgentMemory, Decision, Policy, PolicyKind};
pub use search::{Obstacles, PathResult};
