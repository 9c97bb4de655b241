use std::net::SocketAddr;

use chatbot_client::{routes::create_router, state::AppState};

/// Serves the dev backend on an ephemeral loopback port; returns its base URL.
pub async fn spawn_backend(prefix: &str) -> String {
    let app = create_router(prefix).with_state(AppState::shared());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{prefix}")
}
