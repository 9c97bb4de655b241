// src/services/api_client.rs
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::{
    error::{ApiError, ApiOperation},
    message::{
        ChatHistoryResponse, ChatResponse, ChatSession, CreateSessionRequest, SendMessageRequest,
    },
};

/// The chat backend as seen by the client.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn create_session(&self, name: &str) -> Result<ChatSession, ApiError>;

    /// Sessions in the order the backend returns them.
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, ApiError>;

    async fn get_history(&self, session_id: &str) -> Result<ChatHistoryResponse, ApiError>;

    /// Sends `content`; with no session id the backend starts a new session.
    async fn send_message(
        &self,
        content: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ApiError>;

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError>;
}

/// `ChatApi` over plain JSON HTTP calls. No retries, no timeouts.
#[derive(Clone, Debug)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/chat/sessions/{id}` with the id percent-encoded as one segment.
    fn session_url(&self, op: ApiOperation, session_id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url("/chat/sessions"))
            .map_err(|e| ApiError::new(op, e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::new(op, "base URL cannot carry a path"))?
            .push(session_id);
        Ok(url)
    }

    async fn execute(&self, op: ApiOperation, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation = op.describe(), error = %e, "request error");
            ApiError::new(op, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(operation = op.describe(), %status, "backend returned non-success status");
            return Err(ApiError::new(op, format!("HTTP {status}")));
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        op: ApiOperation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(op, request).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(operation = op.describe(), error = %e, "undecodable response body");
            ApiError::new(op, e.to_string())
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn create_session(&self, name: &str) -> Result<ChatSession, ApiError> {
        let url = self.url("/chat/sessions");
        tracing::debug!(%url, name, "create session");
        let body = CreateSessionRequest {
            session_name: Some(name.to_string()),
        };
        self.fetch_json(ApiOperation::CreateSession, self.client.post(url).json(&body))
            .await
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, ApiError> {
        let url = self.url("/chat/sessions");
        tracing::debug!(%url, "list sessions");
        self.fetch_json(ApiOperation::ListSessions, self.client.get(url))
            .await
    }

    async fn get_history(&self, session_id: &str) -> Result<ChatHistoryResponse, ApiError> {
        let url = self.session_url(ApiOperation::GetHistory, session_id)?;
        tracing::debug!(%url, "get history");
        self.fetch_json(ApiOperation::GetHistory, self.client.get(url))
            .await
    }

    async fn send_message(
        &self,
        content: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ApiError> {
        let url = self.url("/chat/message");
        tracing::debug!(%url, session_id, "send message");
        let body = SendMessageRequest {
            content: content.to_string(),
            session_id: session_id.map(str::to_string),
        };
        self.fetch_json(ApiOperation::SendMessage, self.client.post(url).json(&body))
            .await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let url = self.session_url(ApiOperation::DeleteSession, session_id)?;
        tracing::debug!(%url, "delete session");
        self.execute(ApiOperation::DeleteSession, self.client.delete(url))
            .await?;
        Ok(())
    }
}
