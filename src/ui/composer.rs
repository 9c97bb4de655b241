use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus() == Focus::Composer;
    let disabled = app.pane().is_typing();

    let title = if disabled {
        " Message (waiting for reply) "
    } else {
        " Message (Enter to send, Alt+Enter for newline) "
    };
    let border_style = match (focused, disabled) {
        (_, true) => Style::default().fg(Color::DarkGray),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default(),
    };

    let text = app.composer().text();
    let placeholder = text.is_empty();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);

    let paragraph = if placeholder {
        Paragraph::new("Type your message...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(text).wrap(Wrap { trim: false })
    }
    .block(block);
    frame.render_widget(paragraph, area);

    if focused && app.alert().is_none() && inner.width > 0 && inner.height > 0 {
        let last_line = text.rsplit('\n').next().unwrap_or_default();
        let line_count = u16::try_from(text.split('\n').count()).unwrap_or(u16::MAX);
        let col = u16::try_from(last_line.width()).unwrap_or(u16::MAX);
        let x = inner.x + col.min(inner.width - 1);
        let y = inner.y + line_count.saturating_sub(1).min(inner.height - 1);
        frame.set_cursor_position(Position::new(x, y));
    }
}
