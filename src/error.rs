// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// The five calls the client makes against the chat backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiOperation {
    CreateSession,
    ListSessions,
    GetHistory,
    SendMessage,
    DeleteSession,
}

impl ApiOperation {
    pub fn describe(self) -> &'static str {
        match self {
            ApiOperation::CreateSession => "create session",
            ApiOperation::ListSessions => "fetch sessions",
            ApiOperation::GetHistory => "fetch session history",
            ApiOperation::SendMessage => "send message",
            ApiOperation::DeleteSession => "delete session",
        }
    }
}

/// Any failed backend call. Network errors, non-2xx statuses and bad payloads
/// are deliberately not told apart.
#[derive(Debug, Error)]
#[error("Failed to {}", .operation.describe())]
pub struct ApiError {
    pub operation: ApiOperation,
    pub detail: String,
}

impl ApiError {
    pub fn new(operation: ApiOperation, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }
}

/// Errors returned by the dev server handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
