//! Application state and key handling.

use crate::config::GameConfig;
use crate::input::{digit_position, move_cursor};
use crossterm::event::KeyCode;
use tictactoe_core::{GameController, Position, ScoredMove};
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    config: GameConfig,
    controller: GameController,
    cursor: Position,
    show_hints: bool,
    hints: Vec<ScoredMove>,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    /// Creates a new application and starts the first game.
    #[instrument(skip_all, fields(mode = ?config.mode()))]
    pub fn new(config: GameConfig) -> Self {
        let controller = GameController::new(config.game_mode(), *config.starting_mark());
        let mut app = Self {
            show_hints: *config.show_hints(),
            config,
            controller,
            cursor: Position::Center,
            hints: Vec::new(),
            notice: None,
            should_quit: false,
        };
        app.refresh_hints();
        app
    }

    /// Gets the game controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Gets the highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Checks whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Minimax values for the side to move, when hints are on.
    pub fn hints(&self) -> &[ScoredMove] {
        &self.hints
    }

    /// Re-runs the search for hints. Called whenever the board changes, never
    /// per frame.
    fn refresh_hints(&mut self) {
        self.hints = if self.show_hints {
            self.controller.move_hints()
        } else {
            Vec::new()
        };
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char('h') => {
                self.show_hints = !self.show_hints;
                self.refresh_hints();
                debug!(show_hints = self.show_hints, "Toggled hints");
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor),
            KeyCode::Char(c) => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.play(pos);
                }
            }
            _ => {}
        }
    }

    /// Plays the side to move at `pos`. Ignored once the game is over.
    #[instrument(skip(self))]
    pub fn play(&mut self, pos: Position) {
        if self.controller.result().is_terminal() {
            debug!("Ignoring input after game end");
            return;
        }
        self.notice = match self.controller.play_human_move(pos.row(), pos.col()) {
            Ok(()) => None,
            Err(e) => Some(e.to_string()),
        };
        self.refresh_hints();
    }

    /// Starts a new game ("Play again").
    pub fn restart(&mut self) {
        self.controller.reset(*self.config.starting_mark());
        self.notice = None;
        self.refresh_hints();
    }

    /// Switches between human-vs-human and human-vs-AI.
    ///
    /// The mode is part of the controller's construction, so this builds a
    /// fresh controller and starts a new game.
    pub fn toggle_mode(&mut self) {
        let mode = self.controller.mode().toggled(*self.config.ai_mark());
        info!(%mode, "Switching mode");
        self.controller = GameController::new(mode, *self.config.starting_mark());
        self.notice = Some(format!("Switched to {}", mode));
        self.refresh_hints();
    }

    /// Headline status: the result as text.
    pub fn status(&self) -> String {
        self.controller.status_message()
    }

    /// Secondary line: last error, or whose turn it is, or how to continue.
    pub fn detail(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        if self.controller.result().is_terminal() {
            return "Press 'r' to play again".to_string();
        }
        let turn = self.controller.turn();
        if self.controller.mode().is_ai(turn) {
            format!("{} (AI) to move", turn)
        } else {
            format!("{} to move", turn)
        }
    }
}
