use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{
    composer,
    format::{format_time, wrap_text},
};
use crate::{
    app::{App, pane::ChatPane, pending::is_provisional},
    message::{ChatMessage, MessageRole},
};

pub const EMPTY_TITLE: &str = "Start a Conversation";
pub const LOADING: &str = "Loading...";
pub const TYPING: &str = "Assistant is typing";

const COMPOSER_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(COMPOSER_HEIGHT),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Chat with AI", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  Your intelligent assistant", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, rows[0]);

    render_messages(frame, rows[1], app);
    composer::render(frame, rows[2], app);
}

fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pane = app.pane();
    if pane.is_loading() {
        let loading = Paragraph::new(LOADING)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }

    if pane.messages().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled(EMPTY_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::styled(
                "Send a message to begin chatting with your AI assistant.",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let lines = transcript_lines(pane, inner.width, app.tick());
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(inner.height);
    let offset = max_offset - pane.scroll_back().min(max_offset);

    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

/// All transcript lines, wrapped to `width`, typing indicator last.
pub fn transcript_lines(pane: &ChatPane, width: u16, tick: u64) -> Vec<Line<'static>> {
    let body_width = usize::from(width.saturating_sub(2)).max(1);
    let mut lines = Vec::new();

    for message in pane.messages() {
        lines.push(message_header(message));
        for text in wrap_text(&message.content, body_width) {
            lines.push(Line::from(format!("  {text}")));
        }
        lines.push(Line::from(""));
    }

    if pane.is_typing() {
        let dots = ".".repeat((tick % 4) as usize);
        lines.push(Line::styled(
            format!("{TYPING}{dots}"),
            Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
        ));
    }
    lines
}

fn message_header(message: &ChatMessage) -> Line<'static> {
    let (label, color) = match message.role {
        MessageRole::User => ("You", Color::Cyan),
        MessageRole::Assistant => ("Assistant", Color::Green),
    };
    let mut spans = vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", format_time(&message.created_at)),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if is_provisional(message) {
        spans.push(Span::styled("  sending", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
