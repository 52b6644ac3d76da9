//! Error types for board placement and turn sequencing.

use crate::Mark;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// A placement the board itself rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// Row or column outside `0..=2`.
    #[display("Cell ({}, {}) is outside the 3x3 grid", row, col)]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, col)]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// A move attempted by the wrong party or after the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The game already has a result.
    #[display("Game is already over")]
    GameOver,
    /// The mark to move is controlled by the AI.
    #[display("It's not a human turn ({} is AI-controlled)", _0)]
    NotHumanTurn(#[error(not(source))] Mark),
    /// The AI was asked to move while it does not own the turn.
    #[display("It's not the AI's turn ({} to move)", _0)]
    NoAiTurn(#[error(not(source))] Mark),
}

/// Failure that should be unreachable, with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Internal error: {} at {}:{}", message, file, line)]
pub struct InternalError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InternalError {
    /// Creates a new internal error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Any error returned by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// Out-of-range coordinates or an occupied cell.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),
    /// Wrong player's turn, or the game is over.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),
    /// Search invoked with no legal moves, or a broken invariant.
    #[display("{}", _0)]
    Internal(InternalError),
}
