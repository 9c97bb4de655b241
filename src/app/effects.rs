//! Effects and events exchanged between the reducer and the runtime.
//!
//! The reducer (`App`) never touches the network. It returns [`Effect`]s; the
//! runtime performs them and feeds the outcome back as an [`AppEvent`].

use crate::{
    error::ApiError,
    message::{ChatHistoryResponse, ChatResponse, ChatSession},
};

use super::pane::{LoadTicket, SendRequest, SendTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `seq` orders overlapping reloads; only the newest result is kept.
    LoadSessions { seq: u64 },
    LoadHistory(LoadTicket),
    SendMessage(SendRequest),
    DeleteSession { session_id: String },
    CreateSession { name: String },
}

#[derive(Debug)]
pub enum AppEvent {
    SessionsLoaded {
        seq: u64,
        result: Result<Vec<ChatSession>, ApiError>,
    },
    HistoryLoaded {
        ticket: LoadTicket,
        result: Result<ChatHistoryResponse, ApiError>,
    },
    MessageSent {
        ticket: SendTicket,
        result: Result<ChatResponse, ApiError>,
    },
    SessionDeleted {
        session_id: String,
        result: Result<(), ApiError>,
    },
    SessionCreated(Result<ChatSession, ApiError>),
}
