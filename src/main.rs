use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use chatbot_client::{
    app::App,
    config::ClientArgs,
    logging,
    runtime::{Runtime, terminal},
    services::api_client::HttpChatApi,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = ClientArgs::parse().into_config()?;
    let _log_guard = logging::init_file_logging(&config.log_file)?;
    tracing::info!(api_url = %config.api_url, "frontend is calling backend");

    let api = Arc::new(HttpChatApi::new(config.api_url.clone()));
    let mut runtime = Runtime::new(App::new(config.session_name), api);

    terminal::install_panic_hook();
    let mut tui = terminal::setup_terminal()?;
    let result = runtime.run(&mut tui);
    terminal::restore_terminal()?;
    result
}
