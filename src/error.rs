//! Error types for snapshot parsing.

use std::fmt;

use crate::game::HeroId;

/// Errors raised while decoding a server state payload.
///
/// Any of these is fatal for the current turn: the turn is abandoned
/// rather than guessed at, and the turn driver decides what happens next.
#[derive(Debug)]
pub enum ParseError {
    /// Tile stream length differs from `board_size² × 2`.
    TileStreamLength {
        /// Expected byte length.
        expected: usize,
        /// Actual byte length received.
        actual: usize,
    },
    /// Unknown terrain code in the tile stream.
    UnknownTile {
        /// The unrecognized terrain byte.
        code: char,
        /// Token index (row-major) where it occurred.
        index: usize,
    },
    /// Mine detail code is neither `-` nor a digit.
    MineOwner {
        /// The unrecognized detail byte.
        code: char,
        /// Token index (row-major) where it occurred.
        index: usize,
    },
    /// Hero tile detail code is not a digit.
    HeroTile {
        /// The unrecognized detail byte.
        code: char,
        /// Token index (row-major) where it occurred.
        index: usize,
    },
    /// A hero position lies outside the board.
    HeroOutOfBounds {
        /// The hero in question.
        id: HeroId,
        /// Reported row.
        row: u16,
        /// Reported column.
        col: u16,
    },
    /// The payload is not valid JSON of the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TileStreamLength { expected, actual } => {
                write!(f, "tile stream length {actual} (expected {expected})")
            }
            ParseError::UnknownTile { code, index } => {
                write!(f, "unknown terrain code {code:?} at token {index}")
            }
            ParseError::MineOwner { code, index } => {
                write!(f, "invalid mine owner code {code:?} at token {index}")
            }
            ParseError::HeroTile { code, index } => {
                write!(f, "invalid hero id code {code:?} at token {index}")
            }
            ParseError::HeroOutOfBounds { id, row, col } => {
                write!(f, "hero {id} at ({row}, {col}) is outside the board")
            }
            ParseError::Json(e) => write!(f, "malformed state payload: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json(e)
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
