use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    message::{
        ChatHistoryResponse, ChatResponse, ChatSession, CreateSessionRequest, DEFAULT_SESSION_NAME,
        MessageRole, SendMessageRequest,
    },
    services::{
        chatbot::generate_reply,
        session_manager::{CONTEXT_MESSAGES, MAX_HISTORY_MESSAGES, MAX_LISTED_SESSIONS},
    },
    state::SharedState,
};

pub const MAX_CONTENT_CHARS: usize = 5000;

pub async fn create_session_handler(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Json<ChatSession> {
    let name = payload
        .session_name
        .as_deref()
        .unwrap_or(DEFAULT_SESSION_NAME);
    let session = state.sessions.create_session(name).await;
    tracing::info!(session_id = %session.id, "session created");
    Json(session)
}

pub async fn list_sessions_handler(State(state): State<SharedState>) -> Json<Vec<ChatSession>> {
    Json(state.sessions.list_sessions(MAX_LISTED_SESSIONS).await)
}

pub async fn get_history_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let session = state
        .sessions
        .get_session(&session_id)
        .await
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    let messages = state
        .sessions
        .get_messages(&session_id, MAX_HISTORY_MESSAGES)
        .await
        .unwrap_or_default();
    Ok(Json(ChatHistoryResponse { session, messages }))
}

pub async fn send_message_handler(
    State(state): State<SharedState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let chars = payload.content.chars().count();
    if chars == 0 || chars > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "content must be between 1 and {MAX_CONTENT_CHARS} characters"
        )));
    }

    let session_id = match payload.session_id.as_deref() {
        Some(s) if !s.trim().is_empty() => {
            if state.sessions.get_session(s).await.is_none() {
                return Err(AppError::NotFound("Session not found".to_string()));
            }
            s.to_string()
        }
        _ => state.sessions.create_session(DEFAULT_SESSION_NAME).await.id,
    };

    let user_message = state
        .sessions
        .append_message(&session_id, MessageRole::User, payload.content.as_str())
        .await
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    let context = state
        .sessions
        .recent_messages(&session_id, CONTEXT_MESSAGES)
        .await;
    let reply = generate_reply(&context, &payload.content);

    let assistant_message = state
        .sessions
        .append_message(&session_id, MessageRole::Assistant, reply)
        .await
        .ok_or_else(|| AppError::Internal("session vanished while replying".to_string()))?;

    state.sessions.touch(&session_id).await;
    tracing::debug!(%session_id, "message answered");

    Ok(Json(ChatResponse {
        session_id,
        user_message,
        assistant_message,
    }))
}

pub async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    if state.sessions.remove_session(&session_id).await {
        tracing::info!(%session_id, "session deleted");
    }
    Json(json!({ "message": "Session deleted successfully" }))
}
