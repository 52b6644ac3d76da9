//! First-class invariants for a game session.
//!
//! Invariants are logical properties that must hold after every applied move.
//! The controller checks them as a postcondition; they are also testable on
//! their own.

use crate::controller::GameSession;
use crate::rules::completed_lines;
use crate::{Cell, Mark};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<InvariantViolation> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(held, _)| !held)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Turns alternate: the starting mark has as many marks as the other, or one
/// more, and the turn belongs to whoever is behind.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let first = session.starting_mark();
        let first_count = session.board().count(first);
        let second_count = session.board().count(first.opponent());

        let expected_turn = match first_count.checked_sub(second_count) {
            Some(0) => first,
            Some(1) => first.opponent(),
            _ => {
                warn!(first_count, second_count, "Mark counts out of balance");
                return false;
            }
        };

        let valid = session.turn() == expected_turn;
        if !valid {
            warn!(turn = %session.turn(), expected = %expected_turn, "Turn out of sequence");
        }
        valid
    }

    fn description() -> &'static str {
        "Marks alternate starting from the starting mark"
    }
}

/// At most one mark owns completed lines.
pub struct SingleWinnerInvariant;

impl Invariant<GameSession> for SingleWinnerInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        let valid = completed_lines(board, Mark::X) == 0 || completed_lines(board, Mark::O) == 0;
        if !valid {
            warn!(%board, "Both marks completed a line");
        }
        valid
    }

    fn description() -> &'static str {
        "At most one mark has three in a row"
    }
}

/// Every occupied cell is explained by exactly one history entry.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        let board = session.board();
        let filled = board.cells().iter().filter(|c| **c != Cell::Empty).count();
        let valid = filled == session.history().len()
            && session
                .history()
                .iter()
                .all(|mv| board.get(mv.position) == Cell::Occupied(mv.mark));
        if !valid {
            warn!(filled, history_len = session.history().len(), "History does not match board");
        }
        valid
    }

    fn description() -> &'static str {
        "Move history matches the board"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    AlternatingTurnInvariant,
    SingleWinnerInvariant,
    HistoryConsistentInvariant,
);
