//! Root coordinator: session list, selection, and the chat pane.
//!
//! `App` is a reducer. User intents and backend results mutate it and yield
//! [`Effect`]s; it never performs I/O itself.

pub mod composer;
pub mod effects;
pub mod pane;
pub mod pending;
pub mod sidebar;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::message::{ChatSession, DEFAULT_SESSION_NAME};
use composer::{Composer, ComposerAction};
pub use effects::{AppEvent, Effect};
use pane::{ChatPane, SendOutcome};
use sidebar::SidebarIntent;

const SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Composer,
}

#[derive(Debug)]
pub struct App {
    sessions: Vec<ChatSession>,
    selected: Option<String>,
    pane: ChatPane,
    composer: Composer,
    alert: Option<String>,
    focus: Focus,
    sidebar_cursor: usize,
    sessions_requested: u64,
    sessions_applied: u64,
    session_name: String,
    should_quit: bool,
    tick: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_NAME)
    }
}

impl App {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            sessions: Vec::new(),
            selected: None,
            pane: ChatPane::new(),
            composer: Composer::default(),
            alert: None,
            focus: Focus::Composer,
            sidebar_cursor: 0,
            sessions_requested: 0,
            sessions_applied: 0,
            session_name: session_name.into(),
            should_quit: false,
            tick: 0,
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn pane(&self) -> &ChatPane {
        &self.pane
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn sidebar_cursor(&self) -> usize {
        self.sidebar_cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    // ------------------------------------------------------------------
    // Coordinator operations
    // ------------------------------------------------------------------

    /// Startup: fetch the session list once.
    pub fn initialize(&mut self) -> Vec<Effect> {
        vec![self.load_sessions()]
    }

    pub fn refresh_sessions(&mut self) -> Vec<Effect> {
        vec![self.load_sessions()]
    }

    fn load_sessions(&mut self) -> Effect {
        self.sessions_requested += 1;
        Effect::LoadSessions {
            seq: self.sessions_requested,
        }
    }

    /// Shows `session_id` in the chat pane. Re-selecting the current session
    /// does nothing.
    pub fn select_session(&mut self, session_id: &str) -> Vec<Effect> {
        if self.selected.as_deref() == Some(session_id) {
            return Vec::new();
        }
        self.selected = Some(session_id.to_string());
        self.pane
            .switch_session(self.selected.clone())
            .map(Effect::LoadHistory)
            .into_iter()
            .collect()
    }

    /// Back to an empty, unsaved conversation. No backend call.
    pub fn start_new_chat(&mut self) -> Vec<Effect> {
        if self.selected.is_some() {
            self.selected = None;
            self.pane.switch_session(None);
        }
        self.focus = Focus::Composer;
        Vec::new()
    }

    /// The backend created `session_id` for the conversation on screen.
    pub fn session_created(&mut self, session_id: String) -> Vec<Effect> {
        self.pane.adopt_session(session_id.clone());
        self.selected = Some(session_id);
        vec![self.load_sessions()]
    }

    pub fn delete_session(&mut self, session_id: &str) -> Vec<Effect> {
        vec![Effect::DeleteSession {
            session_id: session_id.to_string(),
        }]
    }

    /// Creates an empty session with the configured name.
    pub fn create_session(&mut self) -> Vec<Effect> {
        vec![Effect::CreateSession {
            name: self.session_name.clone(),
        }]
    }

    /// Starts an optimistic send of `content`. Returns no effect when the
    /// pane refuses the send.
    pub fn send_message(&mut self, content: &str) -> Vec<Effect> {
        self.pane
            .begin_send(content)
            .map(Effect::SendMessage)
            .into_iter()
            .collect()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ------------------------------------------------------------------
    // Backend results
    // ------------------------------------------------------------------

    pub fn apply(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::SessionsLoaded { seq, .. } if seq <= self.sessions_applied => {
                tracing::debug!(seq, "dropping superseded session list");
                Vec::new()
            }
            AppEvent::SessionsLoaded {
                seq,
                result: Ok(sessions),
            } => {
                tracing::debug!(count = sessions.len(), "sessions loaded");
                self.sessions_applied = seq;
                self.sessions = sessions;
                sidebar::clamp_cursor(&mut self.sidebar_cursor, self.sessions.len());
                Vec::new()
            }
            AppEvent::SessionsLoaded {
                result: Err(err), ..
            } => {
                tracing::error!(error = %err, detail = %err.detail, "failed to load sessions");
                Vec::new()
            }
            AppEvent::HistoryLoaded { ticket, result } => {
                self.pane.finish_load(&ticket, result);
                Vec::new()
            }
            AppEvent::MessageSent { ticket, result } => {
                match self.pane.finish_send(&ticket, result) {
                    SendOutcome::Committed {
                        new_session: Some(id),
                    } => self.session_created(id),
                    SendOutcome::Committed { new_session: None } => Vec::new(),
                    SendOutcome::RolledBack { alert } => {
                        self.alert = Some(alert);
                        Vec::new()
                    }
                    // The session exists on the backend now; list it but keep
                    // the current selection.
                    SendOutcome::Discarded {
                        new_session: Some(_),
                    } => vec![self.load_sessions()],
                    SendOutcome::Discarded { new_session: None } => Vec::new(),
                }
            }
            AppEvent::SessionDeleted { session_id, result } => {
                match result {
                    Ok(()) => {
                        tracing::info!(%session_id, "session deleted");
                        if self.selected.as_deref() == Some(session_id.as_str()) {
                            self.selected = None;
                            self.pane.switch_session(None);
                        }
                    }
                    Err(err) => {
                        tracing::error!(%session_id, error = %err, detail = %err.detail, "failed to delete session");
                    }
                }
                vec![self.load_sessions()]
            }
            AppEvent::SessionCreated(Ok(session)) => {
                tracing::info!(session_id = %session.id, "session created");
                self.selected = Some(session.id.clone());
                let mut effects = vec![self.load_sessions()];
                effects.extend(
                    self.pane
                        .switch_session(Some(session.id))
                        .map(Effect::LoadHistory),
                );
                effects
            }
            AppEvent::SessionCreated(Err(err)) => {
                tracing::error!(error = %err, detail = %err.detail, "failed to create session");
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn handle_paste(&mut self, text: &str) {
        if self.alert.is_none() && self.focus == Focus::Composer {
            self.composer.insert_str(text);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        // The alert blocks everything else until it is dismissed.
        if self.alert.is_some() {
            self.dismiss_alert();
            return Vec::new();
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Composer,
                    Focus::Composer => Focus::Sidebar,
                };
                return Vec::new();
            }
            KeyCode::PageUp => {
                self.pane.scroll_up(SCROLL_STEP);
                return Vec::new();
            }
            KeyCode::PageDown => {
                self.pane.scroll_down(SCROLL_STEP);
                return Vec::new();
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => {
                match key.code {
                    KeyCode::Char('q') => {
                        self.should_quit = true;
                        return Vec::new();
                    }
                    KeyCode::Esc => {
                        self.focus = Focus::Composer;
                        return Vec::new();
                    }
                    _ => {}
                }
                match sidebar::handle_key(key, &self.sessions, &mut self.sidebar_cursor) {
                    Some(SidebarIntent::Select(id)) => {
                        self.focus = Focus::Composer;
                        self.select_session(&id)
                    }
                    Some(SidebarIntent::Delete(id)) => self.delete_session(&id),
                    Some(SidebarIntent::NewChat) => self.start_new_chat(),
                    Some(SidebarIntent::CreateNamed) => self.create_session(),
                    Some(SidebarIntent::Refresh) => self.refresh_sessions(),
                    None => Vec::new(),
                }
            }
            Focus::Composer => {
                if key.code == KeyCode::Esc {
                    self.focus = Focus::Sidebar;
                    return Vec::new();
                }
                let disabled = self.pane.is_typing();
                match self.composer.handle_key(key, disabled) {
                    ComposerAction::Submit(text) => {
                        let effects = self.send_message(&text);
                        if !effects.is_empty() {
                            self.composer.clear();
                        }
                        effects
                    }
                    ComposerAction::None => Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{ApiError, ApiOperation},
        message::{ChatHistoryResponse, ChatMessage, ChatResponse, MessageRole},
    };

    fn session(id: &str) -> ChatSession {
        ChatSession {
            id: id.into(),
            session_name: format!("chat {id}"),
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-01T00:00:00Z".into(),
        }
    }

    fn msg(id: &str, session: &str, role: MessageRole) -> ChatMessage {
        ChatMessage {
            id: id.into(),
            session_id: session.into(),
            role,
            content: id.into(),
            created_at: "2025-01-01T00:00:00Z".into(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn only_send(effects: Vec<Effect>) -> pane::SendRequest {
        match effects.as_slice() {
            [Effect::SendMessage(req)] => req.clone(),
            other => panic!("expected one send, got {other:?}"),
        }
    }

    fn reload_seq(effects: Vec<Effect>) -> u64 {
        match effects.as_slice() {
            [Effect::LoadSessions { seq }] => *seq,
            other => panic!("expected one reload, got {other:?}"),
        }
    }

    #[test]
    fn initialize_requests_session_list() {
        let mut app = App::default();
        assert_eq!(app.initialize(), vec![Effect::LoadSessions { seq: 1 }]);
    }

    #[test]
    fn older_session_list_does_not_overwrite_newer() {
        let mut app = App::default();
        let older = reload_seq(app.refresh_sessions());
        let newer = reload_seq(app.refresh_sessions());
        assert!(older < newer);

        app.apply(AppEvent::SessionsLoaded {
            seq: newer,
            result: Ok(vec![session("a"), session("b")]),
        });
        app.apply(AppEvent::SessionsLoaded {
            seq: older,
            result: Ok(vec![session("a"), session("b"), session("deleted")]),
        });

        let ids: Vec<_> = app.sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn session_list_failure_is_silent() {
        let mut app = App::default();
        let effects = app.apply(AppEvent::SessionsLoaded {
            seq: 1,
            result: Err(ApiError::new(ApiOperation::ListSessions, "connection refused")),
        });
        assert!(effects.is_empty());
        assert!(app.sessions().is_empty());
        assert!(app.alert().is_none());
    }

    #[test]
    fn selecting_loads_history_and_null_selection_does_not() {
        let mut app = App::default();
        let effects = app.select_session("s1");
        assert!(matches!(effects.as_slice(), [Effect::LoadHistory(t)] if t.session_id == "s1"));
        assert_eq!(app.selected(), Some("s1"));
        assert!(app.pane().is_loading());

        assert!(app.select_session("s1").is_empty());
        assert!(app.start_new_chat().is_empty());
        assert_eq!(app.selected(), None);
        assert!(app.pane().messages().is_empty());
        assert!(!app.pane().is_loading());
    }

    #[test]
    fn first_message_adopts_new_session_and_refreshes_list() {
        let mut app = App::default();
        let req = only_send(app.send_message("Hello"));
        assert_eq!(req.ticket.session_id, None);
        assert_eq!(app.pane().messages().len(), 1);

        let response = ChatResponse {
            session_id: "s1".into(),
            user_message: msg("u1", "s1", MessageRole::User),
            assistant_message: msg("a1", "s1", MessageRole::Assistant),
        };
        let effects = app.apply(AppEvent::MessageSent {
            ticket: req.ticket,
            result: Ok(response),
        });

        assert!(matches!(effects.as_slice(), [Effect::LoadSessions { .. }]));
        assert_eq!(app.selected(), Some("s1"));
        let ids: Vec<_> = app.pane().messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["u1", "a1"]);
    }

    #[test]
    fn failed_send_raises_blocking_alert() {
        let mut app = App::default();
        let req = only_send(app.send_message("Hello"));
        app.apply(AppEvent::MessageSent {
            ticket: req.ticket,
            result: Err(ApiError::new(ApiOperation::SendMessage, "HTTP 500")),
        });
        assert_eq!(app.alert(), Some(pane::SEND_FAILED_ALERT));
        assert!(app.pane().messages().is_empty());

        // Any key only dismisses the alert.
        assert!(app.handle_key(key(KeyCode::Enter)).is_empty());
        assert!(app.alert().is_none());
    }

    #[test]
    fn failed_send_from_previous_view_raises_no_alert() {
        let mut app = App::default();
        let req = only_send(app.send_message("Hello"));
        app.select_session("s1");

        let effects = app.apply(AppEvent::MessageSent {
            ticket: req.ticket,
            result: Err(ApiError::new(ApiOperation::SendMessage, "HTTP 500")),
        });
        assert!(effects.is_empty());
        assert!(app.alert().is_none());
        assert_eq!(app.selected(), Some("s1"));
        assert!(app.pane().is_loading());
    }

    #[test]
    fn deleting_selected_session_clears_selection() {
        let mut app = App::default();
        app.select_session("s1");
        assert_eq!(
            app.delete_session("s1"),
            vec![Effect::DeleteSession {
                session_id: "s1".into()
            }]
        );
        let effects = app.apply(AppEvent::SessionDeleted {
            session_id: "s1".into(),
            result: Ok(()),
        });
        assert!(matches!(effects.as_slice(), [Effect::LoadSessions { .. }]));
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn deleting_other_session_keeps_selection() {
        let mut app = App::default();
        app.select_session("s1");
        let effects = app.apply(AppEvent::SessionDeleted {
            session_id: "s2".into(),
            result: Ok(()),
        });
        assert!(matches!(effects.as_slice(), [Effect::LoadSessions { .. }]));
        assert_eq!(app.selected(), Some("s1"));
    }

    #[test]
    fn failed_delete_still_refreshes_and_keeps_selection() {
        let mut app = App::default();
        app.select_session("s1");
        let effects = app.apply(AppEvent::SessionDeleted {
            session_id: "s1".into(),
            result: Err(ApiError::new(ApiOperation::DeleteSession, "HTTP 500")),
        });
        assert!(matches!(effects.as_slice(), [Effect::LoadSessions { .. }]));
        assert_eq!(app.selected(), Some("s1"));
    }

    #[test]
    fn explicit_create_selects_and_loads_new_session() {
        let mut app = App::new("Scratch");
        assert_eq!(
            app.create_session(),
            vec![Effect::CreateSession {
                name: "Scratch".into()
            }]
        );
        let effects = app.apply(AppEvent::SessionCreated(Ok(session("s9"))));
        assert!(matches!(effects[0], Effect::LoadSessions { .. }));
        assert!(matches!(&effects[1], Effect::LoadHistory(t) if t.session_id == "s9"));
        assert_eq!(app.selected(), Some("s9"));
    }

    #[test]
    fn history_result_populates_pane() {
        let mut app = App::default();
        let ticket = match app.select_session("s1").as_slice() {
            [Effect::LoadHistory(t)] => t.clone(),
            other => panic!("unexpected {other:?}"),
        };
        app.apply(AppEvent::HistoryLoaded {
            ticket,
            result: Ok(ChatHistoryResponse {
                session: session("s1"),
                messages: vec![msg("m1", "s1", MessageRole::User)],
            }),
        });
        assert_eq!(app.pane().messages().len(), 1);
        assert!(!app.pane().is_loading());
    }

    #[test]
    fn composer_enter_sends_and_clears_only_when_accepted() {
        let mut app = App::default();
        for c in "hi".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let effects = app.handle_key(key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);
        assert_eq!(app.composer().text(), "");

        for c in "again".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(key(KeyCode::Enter)).is_empty());
        assert_eq!(app.composer().text(), "again");
        assert_eq!(app.pane().messages().len(), 1);
    }

    #[test]
    fn sidebar_keys_drive_coordinator() {
        let mut app = App::default();
        app.apply(AppEvent::SessionsLoaded {
            seq: 1,
            result: Ok(vec![session("a"), session("b")]),
        });
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Sidebar);

        app.handle_key(key(KeyCode::Down));
        let effects = app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(
            effects,
            vec![Effect::DeleteSession {
                session_id: "b".into()
            }]
        );
        assert_eq!(app.selected(), None);

        let effects = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::LoadHistory(t)] if t.session_id == "b"));
        assert_eq!(app.focus(), Focus::Composer);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::default();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
