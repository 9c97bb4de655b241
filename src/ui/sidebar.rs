use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::format::format_date;
use crate::app::{App, Focus};

pub const EMPTY_STATE: &str = "No chat history yet";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == Focus::Sidebar;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let new_chat = Paragraph::new(Line::from(vec![
        Span::styled("+ New Chat", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  (n)", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(new_chat, rows[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Chats ");

    if app.sessions().is_empty() {
        let empty = Paragraph::new(vec![Line::from(""), Line::from(EMPTY_STATE)])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .sessions()
        .iter()
        .map(|session| {
            let is_selected = app.selected() == Some(session.id.as_str());
            let name_style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::styled(session.session_name.clone(), name_style),
                Line::styled(
                    format_date(&session.updated_at),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.sidebar_cursor()));
    }
    frame.render_stateful_widget(list, rows[1], &mut state);
}
