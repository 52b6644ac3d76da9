//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_core::{Cell, Mark, Position, ScoredMove};

use crate::app::App;

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Renders the whole screen and returns the area of each cell in row-major
/// order, for mapping mouse clicks back onto the board.
pub fn draw(frame: &mut Frame, app: &App) -> [Rect; 9] {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Min(BOARD_HEIGHT),     // Board
            Constraint::Length(5),             // Status
        ])
        .split(area);

    let title = Paragraph::new(format!("Tic Tac Toe - {}", app.controller().mode()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let cells = draw_board(frame, chunks[1], app);

    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            app.status(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(app.detail()),
        Line::from(Span::styled(
            "arrows/1-9 move  enter play  r restart  m mode  h hints  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    cells
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) -> [Rect; 9] {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let hints = app.hints();
    let winning_line = app.controller().winning_line();

    let mut cells = [Rect::default(); 9];
    for pos in Position::ALL {
        let (row, col) = pos.coords();
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(rows[row * 2]);
        let cell_area = cols[col * 2];
        cells[pos.to_index()] = cell_area;

        let hint = hints.iter().find(|h| h.position == pos).copied();
        let winning = winning_line.as_ref().is_some_and(|line| line.cells.contains(&pos));
        draw_cell(frame, cell_area, app.controller().board().get(pos), pos == app.cursor(), winning, hint);

        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
        if row < 2 && col == 0 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
    cells
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    cell: Cell,
    selected: bool,
    winning: bool,
    hint: Option<ScoredMove>,
) {
    let (symbol, base_style) = match cell {
        Cell::Empty => (" ".to_string(), Style::default().fg(Color::DarkGray)),
        Cell::Occupied(mark) => (mark.to_string(), mark_style(mark)),
    };

    let style = if winning {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let hint_line = match hint {
        Some(h) => Line::from(Span::styled(
            format!("{:+}", h.score),
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(symbol), hint_line])
        .style(style)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(BOARD_WIDTH as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); CELL_HEIGHT as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Finds the board cell under a terminal coordinate.
pub fn cell_at(cells: &[Rect; 9], column: u16, row: u16) -> Option<Position> {
    cells
        .iter()
        .position(|r| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
        .and_then(Position::from_index)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
