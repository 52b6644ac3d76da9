//! Terminal tic-tac-toe against a friend or the minimax AI.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use tracing::{debug, error, info};

use app::App;
use cli::Cli;
use config::GameConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Log to file so output doesn't interfere with the TUI
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting tic-tac-toe");

    let config = GameConfig::load_or_default(&cli.config)?.with_overrides(
        cli.mode,
        cli.ai_mark.map(Into::into),
        cli.starting_mark.map(Into::into),
        cli.hints,
    );
    info!(?config, "Resolved configuration");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(config));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "TUI exited with error");
    }
    info!("Goodbye");
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let mut cells = [Rect::default(); 9];
    loop {
        terminal.draw(|f| {
            cells = ui::draw(f, &app);
        })?;

        // Blocks until input; nothing changes on screen between events.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = ui::cell_at(&cells, mouse.column, mouse.row) {
                    debug!(?pos, "Cell clicked");
                    app.play(pos);
                }
            }
            _ => {}
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
