//! Message list state for the chat pane.

use crate::{
    error::ApiError,
    message::{ChatHistoryResponse, ChatMessage, ChatResponse},
};

use super::pending::PendingSend;

pub const SEND_FAILED_ALERT: &str = "Failed to send message. Please try again.";

/// Identifies one send-message call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    pub temp_id: String,
    pub epoch: u64,
    /// Session the message was sent to; `None` means the backend creates one.
    pub session_id: Option<String>,
}

/// Identifies one history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub session_id: String,
    pub epoch: u64,
}

/// A send accepted by the pane, ready to go to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub ticket: SendTicket,
    pub content: String,
}

#[derive(Debug, Default)]
enum SendPhase {
    #[default]
    Idle,
    Sending(PendingSend),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply is in the list. `new_session` is set when the backend created
    /// the session for this message.
    Committed { new_session: Option<String> },
    /// The provisional message was removed.
    RolledBack { alert: String },
    /// The result belongs to a view the user already left.
    Discarded { new_session: Option<String> },
}

#[derive(Debug, Default)]
pub struct ChatPane {
    session_id: Option<String>,
    messages: Vec<ChatMessage>,
    phase: SendPhase,
    loading: bool,
    // Bumped on every session switch; results tagged with an older epoch are stale.
    epoch: u64,
    // Lines scrolled back from the newest content.
    scroll_back: u16,
}

impl ChatPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while the assistant reply is awaited.
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, SendPhase::Sending(_))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    fn snap_to_bottom(&mut self) {
        self.scroll_back = 0;
    }

    /// Replaces the view with another session. Returns the history fetch to
    /// run, or `None` for the empty new-conversation view.
    pub fn switch_session(&mut self, session_id: Option<String>) -> Option<LoadTicket> {
        self.epoch += 1;
        self.phase = SendPhase::Idle;
        self.messages.clear();
        self.snap_to_bottom();
        self.session_id = session_id;

        match &self.session_id {
            Some(id) => {
                self.loading = true;
                Some(LoadTicket {
                    session_id: id.clone(),
                    epoch: self.epoch,
                })
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    /// Takes on the id the backend assigned to the conversation on screen.
    /// The list already holds the canonical messages, so nothing is refetched.
    pub fn adopt_session(&mut self, session_id: String) {
        self.session_id = Some(session_id);
    }

    /// Applies a finished history fetch. Returns false for stale results.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<ChatHistoryResponse, ApiError>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(session_id = %ticket.session_id, "dropping stale history response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(history) => self.messages = history.messages,
            Err(err) => {
                tracing::error!(session_id = %ticket.session_id, error = %err, detail = %err.detail, "failed to load session history");
                self.messages.clear();
            }
        }
        self.snap_to_bottom();
        true
    }

    /// Starts an optimistic send. Returns `None` when the send is refused:
    /// blank content, a send already in flight, or a history load running.
    pub fn begin_send(&mut self, content: &str) -> Option<SendRequest> {
        let content = content.trim();
        if content.is_empty() || self.is_typing() || self.loading {
            return None;
        }

        let pending = PendingSend::begin(
            &mut self.messages,
            content,
            self.session_id.as_deref(),
            self.epoch,
        );
        let ticket = SendTicket {
            temp_id: pending.temp_id().to_string(),
            epoch: pending.epoch(),
            session_id: self.session_id.clone(),
        };
        self.phase = SendPhase::Sending(pending);
        self.snap_to_bottom();

        Some(SendRequest {
            ticket,
            content: content.to_string(),
        })
    }

    /// Settles the send identified by `ticket`.
    pub fn finish_send(
        &mut self,
        ticket: &SendTicket,
        result: Result<ChatResponse, ApiError>,
    ) -> SendOutcome {
        let created_session = |result: &Result<ChatResponse, ApiError>| match result {
            Ok(resp) if ticket.session_id.is_none() => Some(resp.session_id.clone()),
            _ => None,
        };

        let pending = match std::mem::take(&mut self.phase) {
            SendPhase::Sending(p)
                if ticket.epoch == self.epoch
                    && p.epoch() == ticket.epoch
                    && p.temp_id() == ticket.temp_id =>
            {
                p
            }
            other => {
                self.phase = other;
                match &result {
                    Ok(_) => tracing::info!(temp_id = %ticket.temp_id, "reply arrived after the view changed; discarding"),
                    Err(err) => tracing::warn!(error = %err, detail = %err.detail, "send failed after the view changed"),
                }
                return SendOutcome::Discarded {
                    new_session: created_session(&result),
                };
            }
        };
        self.snap_to_bottom();

        match result {
            Ok(response) => {
                pending.commit(&mut self.messages, &response);
                let new_session = if ticket.session_id.is_none() {
                    self.adopt_session(response.session_id.clone());
                    Some(response.session_id)
                } else {
                    None
                };
                SendOutcome::Committed { new_session }
            }
            Err(err) => {
                tracing::error!(error = %err, detail = %err.detail, "failed to send message");
                pending.roll_back(&mut self.messages);
                SendOutcome::RolledBack {
                    alert: SEND_FAILED_ALERT.to_string(),
                }
            }
        }
    }
}
