use anyhow::{Context, Result};
use clap::Parser;

use chatbot_client::{config::DevServerArgs, logging, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_stdout_logging();
    let args = DevServerArgs::parse();

    let app = routes::create_router(&args.api_prefix).with_state(AppState::shared());

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    tracing::info!(addr = %args.bind, prefix = %args.api_prefix, "chat dev server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
