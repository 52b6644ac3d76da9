//! Turn sequencing for a live game.
//!
//! [`GameController`] owns the one mutable [`GameSession`] and is the only way
//! to change it. Every command runs to completion before returning: a human
//! move that hands the turn to the AI also plays the AI's reply, so a single
//! input produces at most two board changes.

use crate::invariants::{InvariantSet, SessionInvariants};
use crate::minimax::{MinimaxEngine, ScoredMove};
use crate::rules::{self, WinningLine};
use crate::{Actor, Board, GameError, GameResult, IllegalMove, InternalError, InvalidMove, Mark, Move, Position};
use derive_more::Display;
use tracing::{debug, error, info, instrument, warn};

/// Who controls each mark. Fixed when a controller is built.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Two people share the board.
    #[display("Human vs Human")]
    HumanVsHuman,
    /// One person plays against the minimax engine.
    #[display("Human vs AI")]
    HumanVsAi {
        /// The mark the engine plays.
        ai: Mark,
    },
}

impl GameMode {
    /// The AI-controlled mark, if any.
    pub fn ai_mark(self) -> Option<Mark> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsAi { ai } => Some(ai),
        }
    }

    /// Checks whether `mark` is played by the AI.
    pub fn is_ai(self, mark: Mark) -> bool {
        self.ai_mark() == Some(mark)
    }

    /// Switches between the two modes; `ai` is used when enabling the AI.
    pub fn toggled(self, ai: Mark) -> Self {
        match self {
            GameMode::HumanVsHuman => GameMode::HumanVsAi { ai },
            GameMode::HumanVsAi { .. } => GameMode::HumanVsHuman,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::HumanVsAi { ai: Mark::X }
    }
}

/// State of one game: board, side to move and what has been played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    turn: Mark,
    starting_mark: Mark,
    history: Vec<Move>,
}

impl GameSession {
    /// Creates an empty session with `starting_mark` to move.
    pub fn new(starting_mark: Mark) -> Self {
        Self {
            board: Board::empty(),
            turn: starting_mark,
            starting_mark,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the mark that moved first.
    pub fn starting_mark(&self) -> Mark {
        self.starting_mark
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Result recomputed from the board.
    pub fn result(&self) -> GameResult {
        rules::result(&self.board)
    }

    /// Installs the board produced by `mv` and passes the turn (unchecked).
    pub(crate) fn apply(&mut self, mv: Move, board: Board) {
        self.board = board;
        self.history.push(mv);
        self.turn = mv.mark.opponent();
    }
}

/// Game controller: the command and query surface for a front end.
#[derive(Debug, Clone)]
pub struct GameController {
    mode: GameMode,
    engine: Option<MinimaxEngine>,
    session: GameSession,
}

impl GameController {
    /// Creates a controller for `mode` and starts a game with
    /// `starting_mark` to move.
    #[instrument]
    pub fn new(mode: GameMode, starting_mark: Mark) -> Self {
        let mut controller = Self {
            mode,
            engine: mode.ai_mark().map(MinimaxEngine::new),
            session: GameSession::new(starting_mark),
        };
        controller.reset(starting_mark);
        controller
    }

    /// Starts a fresh game with `starting_mark` to move.
    ///
    /// When the AI owns the starting mark its opening move is played before
    /// this returns.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn reset(&mut self, starting_mark: Mark) {
        self.session = GameSession::new(starting_mark);
        info!("Game reset");

        if self.is_ai_turn()
            && let Err(e) = self.play_ai_move()
        {
            error!(error = %e, "AI failed to open the game");
        }
    }

    /// Plays the side to move at `(row, col)` on behalf of a human.
    ///
    /// If the game continues and the AI owns the next turn, the AI replies
    /// before this returns.
    ///
    /// # Errors
    ///
    /// - [`IllegalMove::GameOver`] when the game already has a result.
    /// - [`IllegalMove::NotHumanTurn`] when the AI owns the turn.
    /// - [`InvalidMove`] when the cell is off the grid or occupied.
    ///
    /// On error the session is left untouched. A failed AI reply is logged
    /// and does not undo the human move.
    #[instrument(skip(self), fields(turn = %self.session.turn()))]
    pub fn play_human_move(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        self.ensure_in_progress()?;

        let mark = self.session.turn();
        if self.mode.is_ai(mark) {
            warn!("Rejected human move on the AI's turn");
            return Err(IllegalMove::NotHumanTurn(mark).into());
        }

        let (position, board) = Position::from_coords(row, col)
            .ok_or(InvalidMove::OutOfRange { row, col })
            .and_then(|pos| self.session.board().place_at(pos, mark).map(|board| (pos, board)))
            .inspect_err(|e| {
                warn!(error = %e, "Rejected human move");
            })?;
        self.commit(Move::new(mark, position, Actor::Human), board)?;

        // The human move stands even if the reply fails.
        if self.is_ai_turn()
            && let Err(e) = self.play_ai_move()
        {
            error!(error = %e, "AI failed to reply");
        }
        Ok(())
    }

    /// Lets the engine choose and play a move for its mark.
    ///
    /// # Errors
    ///
    /// - [`IllegalMove::GameOver`] when the game already has a result.
    /// - [`IllegalMove::NoAiTurn`] when the AI does not own the turn.
    /// - [`GameError::Internal`] when the search finds no move, which cannot
    ///   happen on an in-progress board.
    #[instrument(skip(self), fields(turn = %self.session.turn()))]
    pub fn play_ai_move(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;

        let mark = self.session.turn();
        let engine = match self.engine {
            Some(engine) if engine.mark() == mark => engine,
            _ => return Err(IllegalMove::NoAiTurn(mark).into()),
        };

        let position = engine
            .best_move(self.session.board())
            .ok_or_else(|| InternalError::new("Search found no move on an in-progress board"))?;
        let board = self.session.board().place_at(position, mark)?;
        self.commit(Move::new(mark, position, Actor::Ai), board)
    }

    /// Applies a validated move, checking session invariants before the live
    /// session is replaced.
    fn commit(&mut self, mv: Move, board: Board) -> Result<(), GameError> {
        let mut next = self.session.clone();
        next.apply(mv, board);

        SessionInvariants::check_all(&next).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            InternalError::new(format!("Postcondition failed: {}", descriptions))
        })?;

        self.session = next;
        debug!(%mv, board = %self.session.board(), "Move applied");

        let result = self.session.result();
        if result.is_terminal() {
            info!(%result, moves = self.session.history().len(), "Game over");
        }
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.result().is_terminal() {
            warn!("Rejected move after game end");
            return Err(IllegalMove::GameOver.into());
        }
        Ok(())
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// Returns the mark to move next.
    pub fn turn(&self) -> Mark {
        self.session.turn()
    }

    /// Result recomputed from the live board.
    pub fn result(&self) -> GameResult {
        self.session.result()
    }

    /// Returns the mode this controller was built with.
    pub fn mode(&self) -> GameMode {
        self.mode
    }


    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        self.session.history()
    }

    /// Returns the mark that moved first in this game.
    pub fn starting_mark(&self) -> Mark {
        self.session.starting_mark()
    }

    /// Checks whether the AI owns the turn of an unfinished game.
    pub fn is_ai_turn(&self) -> bool {
        !self.result().is_terminal() && self.mode.is_ai(self.session.turn())
    }

    /// The completed line, once the game is won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        rules::winning_line(self.session.board())
    }

    /// Minimax values of every legal move for the side to move.
    ///
    /// Empty once the game is over.
    pub fn move_hints(&self) -> Vec<ScoredMove> {
        if self.result().is_terminal() {
            return Vec::new();
        }
        MinimaxEngine::new(self.session.turn()).evaluate(self.session.board())
    }

    /// Human-readable status line.
    pub fn status_message(&self) -> String {
        self.result().status_message()
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameMode::default(), Mark::O)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_human_vs_human_is_empty() {
        let controller = GameController::new(GameMode::HumanVsHuman, Mark::X);
        assert_eq!(controller.board(), &Board::empty());
        assert_eq!(controller.turn(), Mark::X);
        assert_eq!(controller.result(), GameResult::InProgress);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_human_moves_alternate() {
        let mut controller = GameController::new(GameMode::HumanVsHuman, Mark::O);
        controller.play_human_move(0, 0).unwrap();
        assert_eq!(controller.turn(), Mark::X);
        controller.play_human_move(1, 1).unwrap();
        assert_eq!(controller.turn(), Mark::O);
        assert_eq!(controller.board(), &Board::from_rows(["O..", ".X.", "..."]));
    }

    #[test]
    fn test_ai_opens_when_it_starts() {
        let controller = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::X);
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].actor, Actor::Ai);
        assert_eq!(controller.turn(), Mark::O);
        // Every opening draws, so the first cell in row-major order is chosen.
        assert_eq!(controller.board(), &Board::from_rows(["X..", "...", "..."]));
    }

    #[test]
    fn test_ai_replies_inline() {
        let mut controller = GameController::default();
        controller.play_human_move(1, 1).unwrap();
        assert_eq!(controller.history().len(), 2);
        assert_eq!(controller.turn(), Mark::O);
        assert_eq!(controller.board().count(Mark::X), 1);
    }

    #[test]
    fn test_play_ai_move_rejected_on_human_turn() {
        let mut controller = GameController::default();
        assert_eq!(
            controller.play_ai_move(),
            Err(GameError::IllegalMove(IllegalMove::NoAiTurn(Mark::O)))
        );
        let mut controller = GameController::new(GameMode::HumanVsHuman, Mark::X);
        assert_eq!(
            controller.play_ai_move(),
            Err(GameError::IllegalMove(IllegalMove::NoAiTurn(Mark::X)))
        );
    }

    #[test]
    fn test_out_of_range_move() {
        let mut controller = GameController::new(GameMode::HumanVsHuman, Mark::X);
        assert_eq!(
            controller.play_human_move(0, 3),
            Err(GameError::InvalidMove(InvalidMove::OutOfRange { row: 0, col: 3 }))
        );
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_human_move_rejected_on_ai_turn() {
        let mut controller = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
        controller.session = GameSession::new(Mark::X);

        assert_eq!(
            controller.play_human_move(0, 0),
            Err(GameError::IllegalMove(IllegalMove::NotHumanTurn(Mark::X)))
        );
        assert_eq!(controller.board(), &Board::empty());
        assert_eq!(controller.turn(), Mark::X);
    }

    #[test]
    fn test_commit_rejects_invariant_violation() {
        let mut controller = GameController::new(GameMode::HumanVsHuman, Mark::X);
        let before = controller.session.clone();

        // O moving first breaks the alternation from X.
        let board = Board::from_rows(["O..", "...", "..."]);
        let result = controller.commit(Move::new(Mark::O, Position::TopLeft, Actor::Human), board);

        match result {
            Err(GameError::Internal(e)) => {
                assert!(e.message.starts_with("Postcondition failed"));
                assert!(e.message.contains("Marks alternate"));
            }
            other => panic!("expected internal error, got {:?}", other),
        }
        assert_eq!(controller.session, before);
    }

    #[test]
    fn test_failed_ai_reply_keeps_human_move() {
        let mut controller = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
        controller.engine = None;

        assert_eq!(controller.play_human_move(0, 0), Ok(()));
        assert_eq!(controller.board(), &Board::from_rows(["O..", "...", "..."]));
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.turn(), Mark::X);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(
            GameMode::HumanVsHuman.toggled(Mark::O),
            GameMode::HumanVsAi { ai: Mark::O }
        );
        assert_eq!(
            GameMode::HumanVsAi { ai: Mark::X }.toggled(Mark::X),
            GameMode::HumanVsHuman
        );
    }

    #[test]
    fn test_move_hints_empty_after_game_over() {
        let mut controller = GameController::new(GameMode::HumanVsHuman, Mark::X);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            controller.play_human_move(row, col).unwrap();
        }
        assert_eq!(controller.result(), GameResult::Win(Mark::X));
        assert!(controller.move_hints().is_empty());
        assert_eq!(controller.status_message(), "X is winner");
    }
}
