//! First-class move records.

use crate::{Mark, Position};
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Who asked for a move to be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// A person at the front end.
    Human,
    /// The minimax engine.
    Ai,
}

/// A mark placed at a position, as recorded in the session history.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
#[display("{} -> {}", mark, position)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
    /// Who chose the move.
    pub actor: Actor,
}
