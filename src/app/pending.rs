//! Optimistic message sends.
//!
//! A [`PendingSend`] is created together with the provisional message it puts
//! into the list and is consumed by exactly one of [`PendingSend::commit`] or
//! [`PendingSend::roll_back`].

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::message::{ChatMessage, ChatResponse, MessageRole};

const PROVISIONAL_PREFIX: &str = "pending-";

/// How a pending send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Committed,
    RolledBack,
}

/// A user message shown before the backend acknowledged it.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingSend {
    temp_id: String,
    epoch: u64,
}

impl PendingSend {
    /// Appends the provisional message for `content` to `messages`.
    pub fn begin(
        messages: &mut Vec<ChatMessage>,
        content: &str,
        session_id: Option<&str>,
        epoch: u64,
    ) -> Self {
        let temp_id = format!("{PROVISIONAL_PREFIX}{}", Uuid::new_v4());
        messages.push(ChatMessage {
            id: temp_id.clone(),
            session_id: session_id.unwrap_or_default().to_string(),
            role: MessageRole::User,
            content: content.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        Self { temp_id, epoch }
    }

    pub fn temp_id(&self) -> &str {
        &self.temp_id
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Swaps the provisional entry for the server's user message and appends
    /// the assistant reply.
    pub fn commit(self, messages: &mut Vec<ChatMessage>, response: &ChatResponse) -> Settled {
        match messages.iter().position(|m| m.id == self.temp_id) {
            Some(idx) => messages[idx] = response.user_message.clone(),
            None => messages.push(response.user_message.clone()),
        }
        messages.push(response.assistant_message.clone());
        Settled::Committed
    }

    /// Removes the provisional entry, leaving the list as it was before `begin`.
    pub fn roll_back(self, messages: &mut Vec<ChatMessage>) -> Settled {
        messages.retain(|m| m.id != self.temp_id);
        Settled::RolledBack
    }
}

pub fn is_provisional(message: &ChatMessage) -> bool {
    message.id.starts_with(PROVISIONAL_PREFIX)
}
