//! Core domain types for tic-tac-toe.

use super::error::InvalidMove;
use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark placed by a player.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Mark {
    /// The X mark.
    X,
    /// The O mark.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. [`Board::place`] never mutates the
/// receiver; it hands back a new snapshot, which is what the minimax search
/// relies on when it explores hypothetical moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Side length of the grid.
    pub const SIZE: usize = 3;

    /// Creates a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if the cell at the given position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns a new board with `mark` placed at `(row, col)`.
    ///
    /// Turn order is not checked here; that is the controller's job.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfRange`] when `row` or `col` is outside
    /// `0..=2` and [`InvalidMove::Occupied`] when the cell already holds a
    /// mark.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&self, row: usize, col: usize, mark: Mark) -> Result<Board, InvalidMove> {
        let pos = Position::from_coords(row, col).ok_or(InvalidMove::OutOfRange { row, col })?;
        self.place_at(pos, mark)
    }

    /// Returns a new board with `mark` placed at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::Occupied`] when the cell already holds a mark.
    pub fn place_at(&self, pos: Position, mark: Mark) -> Result<Board, InvalidMove> {
        if !self.is_empty(pos) {
            return Err(InvalidMove::Occupied {
                row: pos.row(),
                col: pos.col(),
            });
        }
        let mut next = *self;
        next.cells[pos.to_index()] = Cell::Occupied(mark);
        Ok(next)
    }

    /// Empty positions in row-major order.
    ///
    /// This order is the search's move-generation order, so among equally
    /// scored moves the first one listed here wins.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Counts the cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Builds a board from rows of `'X'`, `'O'` and any other character for
    /// an empty cell.
    ///
    /// No validity checks are made, which makes this handy for setting up
    /// positions in tests and benchmarks.
    pub fn from_rows(rows: [&str; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(Self::SIZE).enumerate() {
                cells[row * Self::SIZE + col] = match ch {
                    'X' | 'x' => Cell::Occupied(Mark::X),
                    'O' | 'o' => Cell::Occupied(Mark::O),
                    _ => Cell::Empty,
                };
            }
        }
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..Self::SIZE {
            for col in 0..Self::SIZE {
                let symbol = match self.cells[row * Self::SIZE + col] {
                    Cell::Empty => '.',
                    Cell::Occupied(Mark::X) => 'X',
                    Cell::Occupied(Mark::O) => 'O',
                };
                write!(f, "{}", symbol)?;
                if col < Self::SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            if row < Self::SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Outcome of a board, always derived from its cells.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// No line yet and cells remain.
    #[display("Still Playing")]
    InProgress,
    /// A mark completed a line.
    #[display("{} is winner", _0)]
    Win(Mark),
    /// Full board with no line.
    #[display("It's a tie!")]
    Draw,
}

impl GameResult {
    /// Returns true once the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameResult::Win(mark) => Some(mark),
            _ => None,
        }
    }

    /// Human-readable status line for the front end.
    pub fn status_message(self) -> String {
        self.to_string()
    }
}
