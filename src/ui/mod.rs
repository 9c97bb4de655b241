//! Rendering. Everything here reads `App` and draws; nothing mutates state.

pub mod chat;
pub mod composer;
pub mod format;
pub mod sidebar;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

pub const SIDEBAR_WIDTH: u16 = 32;

pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(frame.area());

    sidebar::render(frame, columns[0], app);
    chat::render(frame, columns[1], app);

    if let Some(message) = app.alert() {
        render_alert(frame, message);
    }
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 50, 7);
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press any key to continue", Style::default().fg(Color::DarkGray)),
    ];
    let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
