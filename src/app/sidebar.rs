//! Sidebar key handling. The sidebar owns no data; it only turns key presses
//! over the coordinator's session list into intents.

use crossterm::event::{KeyCode, KeyEvent};

use crate::message::ChatSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarIntent {
    Select(String),
    Delete(String),
    NewChat,
    CreateNamed,
    Refresh,
}

/// Maps `key` to an intent, moving `cursor` for navigation keys.
pub fn handle_key(key: KeyEvent, sessions: &[ChatSession], cursor: &mut usize) -> Option<SidebarIntent> {
    let under_cursor = sessions.get(*cursor).map(|s| s.id.clone());

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *cursor + 1 < sessions.len() {
                *cursor += 1;
            }
            None
        }
        KeyCode::Home => {
            *cursor = 0;
            None
        }
        KeyCode::End => {
            *cursor = sessions.len().saturating_sub(1);
            None
        }
        KeyCode::Enter => under_cursor.map(SidebarIntent::Select),
        KeyCode::Delete | KeyCode::Char('d') => under_cursor.map(SidebarIntent::Delete),
        KeyCode::Char('n') => Some(SidebarIntent::NewChat),
        KeyCode::Char('c') => Some(SidebarIntent::CreateNamed),
        KeyCode::Char('r') => Some(SidebarIntent::Refresh),
        _ => None,
    }
}

/// Keeps `cursor` inside the list after it was reloaded.
pub fn clamp_cursor(cursor: &mut usize, len: usize) {
    *cursor = (*cursor).min(len.saturating_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn session(id: &str) -> ChatSession {
        ChatSession {
            id: id.into(),
            session_name: id.into(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let sessions = vec![session("a"), session("b")];
        let mut cursor = 0;
        assert_eq!(handle_key(key(KeyCode::Up), &sessions, &mut cursor), None);
        assert_eq!(cursor, 0);
        handle_key(key(KeyCode::Down), &sessions, &mut cursor);
        handle_key(key(KeyCode::Down), &sessions, &mut cursor);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn enter_and_delete_target_the_cursor_row() {
        let sessions = vec![session("a"), session("b")];
        let mut cursor = 1;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &sessions, &mut cursor),
            Some(SidebarIntent::Select("b".into()))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('d')), &sessions, &mut cursor),
            Some(SidebarIntent::Delete("b".into()))
        );
    }

    #[test]
    fn empty_list_yields_no_row_intents() {
        let mut cursor = 0;
        assert_eq!(handle_key(key(KeyCode::Enter), &[], &mut cursor), None);
        assert_eq!(handle_key(key(KeyCode::Delete), &[], &mut cursor), None);
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &[], &mut cursor),
            Some(SidebarIntent::NewChat)
        );
    }

    #[test]
    fn clamp_after_shrink() {
        let mut cursor = 5;
        clamp_cursor(&mut cursor, 2);
        assert_eq!(cursor, 1);
        clamp_cursor(&mut cursor, 0);
        assert_eq!(cursor, 0);
    }
}
