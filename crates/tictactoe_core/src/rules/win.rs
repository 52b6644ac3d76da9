//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Mark, Position};
use serde::{Deserialize, Serialize};

/// The eight lines, in the order they are checked.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// The mark holding all three cells.
    pub mark: Mark,
    /// The three cells, in line order.
    pub cells: [Position; 3],
}

/// Finds the first completed line: rows, then columns, then diagonals.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| {
        let cell = board.get(a);
        match cell {
            Cell::Occupied(mark) if cell == board.get(b) && cell == board.get(c) => {
                Some(WinningLine {
                    mark,
                    cells: [a, b, c],
                })
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

/// Counts the completed lines belonging to `mark`.
pub fn completed_lines(board: &Board, mark: Mark) -> usize {
    LINES
        .iter()
        .filter(|line| line.iter().all(|&pos| board.get(pos) == Cell::Occupied(mark)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::empty()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_rows(["XXX", "OO.", "..."]);
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_column() {
        let board = Board::from_rows(["XO.", "XO.", ".OX"]);
        let line = winning_line(&board).unwrap();
        assert_eq!(line.mark, Mark::O);
        assert_eq!(
            line.cells,
            [Position::TopCenter, Position::Center, Position::BottomCenter]
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_rows(["XXO", ".O.", "O.X"]);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_rows_checked_before_columns() {
        // Both the top row and the left column are X; the row is found first.
        let board = Board::from_rows(["XXX", "XOO", "XOO"]);
        let line = winning_line(&board).unwrap();
        assert_eq!(
            line.cells,
            [Position::TopLeft, Position::TopCenter, Position::TopRight]
        );
        assert_eq!(completed_lines(&board, Mark::X), 2);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_rows(["XX.", "O..", "O.."]);
        assert_eq!(check_winner(&board), None);
    }
}
