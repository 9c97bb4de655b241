// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use chat::{
    create_session_handler, delete_session_handler, get_history_handler, list_sessions_handler,
    send_message_handler,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the dev server router. Chat routes live under `prefix` (may be empty).
pub fn create_router(prefix: &str) -> Router<SharedState> {
    let chat_routes = Router::new()
        .route(
            "/chat/sessions",
            post(create_session_handler).get(list_sessions_handler),
        )
        .route(
            "/chat/sessions/{session_id}",
            get(get_history_handler).delete(delete_session_handler),
        )
        .route("/chat/message", post(send_message_handler));

    let prefix = prefix.trim().trim_end_matches('/');
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }));

    let app = if prefix.is_empty() {
        app.merge(chat_routes)
    } else if prefix.starts_with('/') {
        app.nest(prefix, chat_routes)
    } else {
        app.nest(&format!("/{prefix}"), chat_routes)
    };

    app.layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "message": "AI Chatbot API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
