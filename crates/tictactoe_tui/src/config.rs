//! Game configuration loaded from a TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_core::{GameMode, Mark};
use tracing::{debug, info, instrument};

/// Which kind of opponent the human faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSetting {
    /// Two people share the keyboard.
    HumanVsHuman,
    /// One person plays the minimax engine.
    HumanVsAi,
}

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Opponent kind.
    #[serde(default = "default_mode")]
    mode: ModeSetting,

    /// Mark the engine plays when the AI is enabled.
    #[serde(default = "default_ai_mark")]
    ai_mark: Mark,

    /// Mark that moves first after every reset.
    #[serde(default = "default_starting_mark")]
    starting_mark: Mark,

    /// Show minimax scores on empty cells.
    #[serde(default)]
    show_hints: bool,
}

fn default_mode() -> ModeSetting {
    ModeSetting::HumanVsAi
}

fn default_ai_mark() -> Mark {
    Mark::X
}

fn default_starting_mark() -> Mark {
    Mark::O
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            ai_mark: default_ai_mark(),
            starting_mark: default_starting_mark(),
            show_hints: false,
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = ?config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces any setting given on the command line.
    pub fn with_overrides(
        mut self,
        mode: Option<ModeSetting>,
        ai_mark: Option<Mark>,
        starting_mark: Option<Mark>,
        show_hints: bool,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(mark) = ai_mark {
            self.ai_mark = mark;
        }
        if let Some(mark) = starting_mark {
            self.starting_mark = mark;
        }
        self.show_hints |= show_hints;
        self
    }

    /// Controller mode for these settings.
    pub fn game_mode(&self) -> GameMode {
        match self.mode {
            ModeSetting::HumanVsHuman => GameMode::HumanVsHuman,
            ModeSetting::HumanVsAi => GameMode::HumanVsAi { ai: self.ai_mark },
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
