//! Tic-tac-toe game core with an exhaustive minimax opponent.
//!
//! This library holds everything except drawing and input: the board,
//! terminal-state detection, the minimax search and the controller that
//! sequences human and AI turns.
//!
//! # Architecture
//!
//! - **Board**: immutable 3x3 snapshots ([`Board`], [`Position`], [`rules`])
//! - **Search**: [`MinimaxEngine`] scores every line of play to the end
//! - **Controller**: [`GameController`] owns the live [`GameSession`]
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameController, GameMode, GameResult, Mark};
//!
//! # fn main() -> Result<(), tictactoe_core::GameError> {
//! // Human plays O and moves first; the AI answers as X.
//! let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
//! game.play_human_move(1, 1)?;
//!
//! assert_eq!(game.turn(), Mark::O);
//! assert_eq!(game.result(), GameResult::InProgress);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod controller;
mod error;
mod position;
mod types;

// Public modules
pub mod invariants;
pub mod minimax;
pub mod rules;

// Crate-level exports - Board types
pub use position::Position;
pub use types::{Board, Cell, GameResult, Mark};

// Crate-level exports - Moves and errors
pub use action::{Actor, Move};
pub use error::{GameError, IllegalMove, InternalError, InvalidMove};

// Crate-level exports - Search and control
pub use controller::{GameController, GameMode, GameSession};
pub use minimax::{MinimaxEngine, ScoredMove};
pub use rules::WinningLine;
