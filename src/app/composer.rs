use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Message input buffer.
#[derive(Debug, Default)]
pub struct Composer {
    buffer: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ComposerAction {
    None,
    /// Trimmed, non-empty text the user wants to send.
    Submit(String),
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Edits the buffer. While `disabled` the text can still be edited but
    /// nothing is submitted.
    pub fn handle_key(&mut self, key: KeyEvent, disabled: bool) -> ComposerAction {
        match key.code {
            KeyCode::Enter if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
                self.buffer.push('\n');
                ComposerAction::None
            }
            KeyCode::Enter => {
                let text = self.buffer.trim();
                if disabled || text.is_empty() {
                    ComposerAction::None
                } else {
                    ComposerAction::Submit(text.to_string())
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                ComposerAction::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                ComposerAction::None
            }
            _ => ComposerAction::None,
        }
    }

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}
