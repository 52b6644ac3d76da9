//! Command-line interface for the tic-tac-toe terminal game.

use crate::config::ModeSetting;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tictactoe_core::Mark;

/// Tic-tac-toe in the terminal, against a friend or the minimax AI
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against a friend or an unbeatable AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Opponent kind (overrides the config file)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeSetting>,

    /// Mark the AI plays (overrides the config file)
    #[arg(long, value_enum)]
    pub ai_mark: Option<MarkArg>,

    /// Mark that moves first (overrides the config file)
    #[arg(long, value_enum)]
    pub starting_mark: Option<MarkArg>,

    /// Show minimax scores on empty cells
    #[arg(long)]
    pub hints: bool,

    /// File receiving log output
    #[arg(long, default_value = "tictactoe.log")]
    pub log_file: PathBuf,
}

/// Mark as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// The X mark
    X,
    /// The O mark
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}
