//! Exhaustive minimax search for the AI player.
//!
//! The search walks every line of play from the given board to a terminal
//! state. There is no pruning, no depth limit and no transposition cache: a
//! 3x3 board bottoms out after at most nine plies, which keeps the tree small
//! enough to search in full on every move.
//!
//! Terminal states are scored from the maximizing mark's point of view:
//! [`WIN_SCORE`] when it has won, [`LOSS_SCORE`] when the opponent has won and
//! [`DRAW_SCORE`] for a draw. Scores are not adjusted for depth, so a win in
//! one move and a win in five moves are worth the same.

use crate::rules;
use crate::{Board, GameResult, Mark, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board the maximizing mark has won.
pub const WIN_SCORE: i32 = 10;
/// Score of a board the opponent has won.
pub const LOSS_SCORE: i32 = -10;
/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;

/// A legal move together with its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ScoredMove {
    /// Where the maximizing mark would play.
    pub position: Position,
    /// Value of the board after that move, with the opponent to reply.
    pub score: i32,
}

/// Minimax search on behalf of one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxEngine {
    maximizing: Mark,
}

impl MinimaxEngine {
    /// Creates an engine that plays for `maximizing`.
    pub fn new(maximizing: Mark) -> Self {
        Self { maximizing }
    }

    /// The mark this engine optimizes for.
    pub fn mark(&self) -> Mark {
        self.maximizing
    }

    /// Fixed value of a terminal result, `None` while still in progress.
    pub fn terminal_score(&self, result: GameResult) -> Option<i32> {
        match result {
            GameResult::Win(mark) if mark == self.maximizing => Some(WIN_SCORE),
            GameResult::Win(_) => Some(LOSS_SCORE),
            GameResult::Draw => Some(DRAW_SCORE),
            GameResult::InProgress => None,
        }
    }

    /// Minimax value of `board`.
    ///
    /// When `maximizing` is true the engine's own mark is to move and the
    /// best child is taken; otherwise the opponent moves and the worst child
    /// (for the engine) is taken.
    pub fn score(&self, board: &Board, maximizing: bool) -> i32 {
        if let Some(score) = self.terminal_score(rules::result(board)) {
            return score;
        }

        let to_move = if maximizing {
            self.maximizing
        } else {
            self.maximizing.opponent()
        };

        let children = board.empty_cells().into_iter().filter_map(|pos| {
            // Positions come from empty_cells, so placement cannot fail.
            let child = board.place_at(pos, to_move).ok()?;
            Some(self.score(&child, !maximizing))
        });

        let best = if maximizing {
            children.max()
        } else {
            children.min()
        };
        // A non-terminal board always has an empty cell.
        best.unwrap_or(DRAW_SCORE)
    }

    /// Scores every legal move for the engine's mark, in row-major order.
    #[instrument(skip(self, board), fields(mark = %self.maximizing))]
    pub fn evaluate(&self, board: &Board) -> Vec<ScoredMove> {
        board
            .empty_cells()
            .into_iter()
            .filter_map(|pos| {
                let child = board.place_at(pos, self.maximizing).ok()?;
                Some(ScoredMove::new(pos, self.score(&child, false)))
            })
            .collect()
    }

    /// Picks the move with the strictly greatest score.
    ///
    /// Ties go to the first move in row-major order. Returns `None` only when
    /// the board has no empty cell.
    #[instrument(skip(self, board), fields(mark = %self.maximizing))]
    pub fn best_move(&self, board: &Board) -> Option<Position> {
        let mut best: Option<ScoredMove> = None;
        for scored in self.evaluate(board) {
            if best.is_none_or(|b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        if let Some(chosen) = best {
            debug!(position = %chosen.position, score = chosen.score, "Selected move");
        }
        best.map(|chosen| chosen.position)
    }
}
