//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The result of a game is never stored;
//! callers recompute it from the board whenever they need it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinningLine, check_winner, completed_lines, winning_line};

use crate::{Board, GameResult};

/// Computes the result of a board.
///
/// Lines are checked rows first, then columns, then the two diagonals; the
/// first completed line decides the winner. Without a line, a full board is
/// a draw and anything else is still in progress.
pub fn result(board: &Board) -> GameResult {
    match check_winner(board) {
        Some(mark) => GameResult::Win(mark),
        None if is_draw(board) => GameResult::Draw,
        None => GameResult::InProgress,
    }
}
