//! Stateless UI rendering for minesweeper.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use crate::render::Glyph;

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new(format!(
        "Strictly Minesweeper - {} mines left",
        app.mines_remaining()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("Arrows/hjkl: Move | Enter/Space: Reveal | F: Flag | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let width = (view.cols() as u16).saturating_mul(3).saturating_add(2);
    let height = (view.rows() as u16).saturating_add(2);
    let board_area = center_rect(area, width, height);

    let lines: Vec<Line> = (0..view.rows())
        .map(|row| {
            Line::from(
                (0..view.cols())
                    .map(|col| cell_span(view.get(row, col), (row, col) == app.cursor()))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, board_area);
}

fn cell_span(glyph: Option<Glyph>, selected: bool) -> Span<'static> {
    let glyph = glyph.unwrap_or_default();
    let base_style = match glyph {
        Glyph::Hidden => Style::default().fg(Color::DarkGray),
        Glyph::Flagged => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Glyph::Mine => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Glyph::Count(0) => Style::default().fg(Color::Gray),
        Glyph::Count(1) => Style::default().fg(Color::Blue),
        Glyph::Count(2) => Style::default().fg(Color::Green),
        Glyph::Count(3) => Style::default().fg(Color::Red),
        Glyph::Count(_) => Style::default().fg(Color::Magenta),
    };

    let style = if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    Span::styled(format!(" {} ", glyph.symbol()), style)
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
