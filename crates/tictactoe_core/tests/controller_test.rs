//! Tests for turn sequencing through the controller API.

use tictactoe_core::rules;
use tictactoe_core::{
    Actor, Board, GameController, GameError, GameMode, GameResult, IllegalMove, InvalidMove,
    Mark, MinimaxEngine,
};

#[test]
fn test_occupied_cell_leaves_state_unchanged() {
    let mut game = GameController::new(GameMode::HumanVsHuman, Mark::X);
    game.play_human_move(1, 1).unwrap();

    let board = *game.board();
    let turn = game.turn();
    let result = game.result();

    let err = game.play_human_move(1, 1).unwrap_err();
    assert_eq!(err, GameError::InvalidMove(InvalidMove::Occupied { row: 1, col: 1 }));
    assert_eq!(game.board(), &board);
    assert_eq!(game.turn(), turn);
    assert_eq!(game.result(), result);
}

#[test]
fn test_occupied_cell_does_not_trigger_ai() {
    let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
    game.play_human_move(0, 0).unwrap();
    let history_len = game.history().len();

    assert!(matches!(
        game.play_human_move(0, 0),
        Err(GameError::InvalidMove(InvalidMove::Occupied { .. }))
    ));
    assert_eq!(game.history().len(), history_len);
    assert_eq!(game.turn(), Mark::O);
}

#[test]
fn test_ai_answers_corner_opening_with_center() {
    let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
    game.reset(Mark::O);
    game.play_human_move(0, 0).unwrap();

    assert_eq!(game.board(), &Board::from_rows(["O..", ".X.", "..."]));
    assert_eq!(game.turn(), Mark::O);
    assert_eq!(game.history()[1].actor, Actor::Ai);

    // The human, moving next, cannot force a win from here.
    let ai = MinimaxEngine::new(Mark::X);
    assert!(ai.score(game.board(), false) >= 0);
}

#[test]
fn test_moves_rejected_after_win() {
    let mut game = GameController::new(GameMode::HumanVsHuman, Mark::X);
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        game.play_human_move(row, col).unwrap();
    }
    assert_eq!(game.result(), GameResult::Win(Mark::X));

    let board = *game.board();
    assert_eq!(
        game.play_human_move(2, 2),
        Err(GameError::IllegalMove(IllegalMove::GameOver))
    );
    assert_eq!(game.board(), &board);
    assert_eq!(game.result(), GameResult::Win(Mark::X));
}

#[test]
fn test_result_is_idempotent() {
    let mut game = GameController::new(GameMode::HumanVsHuman, Mark::O);
    game.play_human_move(2, 0).unwrap();
    let first = game.result();
    for _ in 0..5 {
        assert_eq!(game.result(), first);
    }
    assert_eq!(game.status_message(), "Still Playing");
}

#[test]
fn test_reset_replaces_session() {
    let mut game = GameController::new(GameMode::HumanVsHuman, Mark::X);
    game.play_human_move(0, 0).unwrap();
    game.play_human_move(1, 1).unwrap();

    game.reset(Mark::O);
    assert_eq!(game.board(), &Board::empty());
    assert_eq!(game.turn(), Mark::O);
    assert_eq!(game.starting_mark(), Mark::O);
    assert_eq!(game.result(), GameResult::InProgress);
    assert!(game.history().is_empty());
}

#[test]
fn test_turn_returns_to_human_after_ai() {
    // O starts and the AI plays O, so the AI opens before the human sees the
    // board.
    let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::O }, Mark::O);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.turn(), Mark::X);
    game.play_human_move(2, 2).unwrap();
    assert_eq!(game.turn(), Mark::X);

    let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
    game.play_human_move(1, 1).unwrap();
    assert!(!game.is_ai_turn());
}

#[test]
fn test_human_vs_ai_never_ends_in_human_win() {
    // The human always takes the first free cell; the AI still never loses.
    let mut game = GameController::new(GameMode::HumanVsAi { ai: Mark::X }, Mark::O);
    while !game.result().is_terminal() {
        let pos = game.board().empty_cells()[0];
        game.play_human_move(pos.row(), pos.col()).unwrap();
    }
    assert_ne!(game.result(), GameResult::Win(Mark::O));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut game = GameController::new(GameMode::HumanVsHuman, Mark::X);
    // X O X / X O O / O X X
    for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
        game.play_human_move(row, col).unwrap();
    }
    assert_eq!(game.board(), &Board::from_rows(["XOX", "XOO", "OXX"]));
    assert_eq!(game.result(), GameResult::Draw);
    assert_eq!(game.status_message(), "It's a tie!");
}

/// Visits every board reachable by alternating legal moves.
fn visit_reachable(board: Board, to_move: Mark, visit: &mut impl FnMut(&Board)) {
    visit(&board);
    if rules::result(&board).is_terminal() {
        return;
    }
    for pos in board.empty_cells() {
        let next = board.place_at(pos, to_move).unwrap();
        visit_reachable(next, to_move.opponent(), visit);
    }
}

#[test]
fn test_reachable_boards_have_at_most_one_winner() {
    for first in [Mark::X, Mark::O] {
        let mut boards = 0usize;
        visit_reachable(Board::empty(), first, &mut |board| {
            boards += 1;
            let x_lines = rules::completed_lines(board, Mark::X);
            let o_lines = rules::completed_lines(board, Mark::O);
            assert!(x_lines == 0 || o_lines == 0, "two winners:\n{}", board);
        });
        assert!(boards > 0);
    }
}
