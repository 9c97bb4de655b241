// src/services/session_manager.rs
use std::{collections::HashMap, fmt::Debug, sync::Arc};

use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::message::{ChatMessage, ChatSession, MessageRole};

pub const MAX_LISTED_SESSIONS: usize = 20;
pub const MAX_HISTORY_MESSAGES: usize = 50;
pub const CONTEXT_MESSAGES: usize = 10;

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Clone, Debug)]
struct StoredSession {
    session: ChatSession,
    messages: Vec<ChatMessage>,
    // Monotonic touch counter; orders sessions whose timestamps collide.
    last_active: u64,
}

#[derive(Default)]
struct Store {
    sessions: HashMap<String, StoredSession>,
    clock: u64,
}

impl Store {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// In-memory sessions and messages for the dev server.
#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<RwLock<Store>>,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Create a fresh session and return it.
    pub async fn create_session(&self, name: &str) -> ChatSession {
        let now = now_timestamp();
        let session = ChatSession {
            id: Uuid::new_v4().to_string(),
            session_name: name.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut guard = self.inner.write().await;
        let last_active = guard.tick();
        guard.sessions.insert(
            session.id.clone(),
            StoredSession {
                session: session.clone(),
                messages: Vec::new(),
                last_active,
            },
        );
        session
    }

    pub async fn get_session(&self, session_id: &str) -> Option<ChatSession> {
        let guard = self.inner.read().await;
        guard.sessions.get(session_id).map(|s| s.session.clone())
    }

    /// Most recently updated first, at most `limit`.
    pub async fn list_sessions(&self, limit: usize) -> Vec<ChatSession> {
        let guard = self.inner.read().await;
        let mut stored: Vec<&StoredSession> = guard.sessions.values().collect();
        stored.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        stored
            .into_iter()
            .take(limit)
            .map(|s| s.session.clone())
            .collect()
    }

    // Append a message to a session's history. None if the session is gone.
    pub async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Option<ChatMessage> {
        let mut guard = self.inner.write().await;
        let entry = guard.sessions.get_mut(session_id)?;
        let msg = ChatMessage {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            role,
            content: content.into(),
            created_at: now_timestamp(),
        };
        entry.messages.push(msg.clone());
        Some(msg)
    }

    /// Oldest first, at most `limit`.
    pub async fn get_messages(&self, session_id: &str, limit: usize) -> Option<Vec<ChatMessage>> {
        let guard = self.inner.read().await;
        guard
            .sessions
            .get(session_id)
            .map(|s| s.messages.iter().take(limit).cloned().collect())
    }

    /// The last `limit` messages, oldest first.
    pub async fn recent_messages(&self, session_id: &str, limit: usize) -> Vec<ChatMessage> {
        let guard = self.inner.read().await;
        guard
            .sessions
            .get(session_id)
            .map(|s| {
                let start = s.messages.len().saturating_sub(limit);
                s.messages[start..].to_vec()
            })
            .unwrap_or_default()
    }

    /// Bump `updated_at` and move the session to the front of the listing.
    pub async fn touch(&self, session_id: &str) {
        let mut guard = self.inner.write().await;
        let tick = guard.tick();
        if let Some(entry) = guard.sessions.get_mut(session_id) {
            entry.session.updated_at = now_timestamp();
            entry.last_active = tick;
        }
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.sessions.remove(session_id).is_some()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
