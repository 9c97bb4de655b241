// src/config.rs
use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Result, bail};
use clap::Parser;

use crate::message::DEFAULT_SESSION_NAME;

/// Terminal chat client for the session-based assistant API.
#[derive(Debug, Parser)]
#[command(name = "chatbot-client", version, about)]
pub struct ClientArgs {
    /// Base URL of the chat backend, e.g. http://localhost:8000/api
    #[arg(long, env = "CHAT_API_URL")]
    pub api_url: Option<String>,

    /// File that receives the client's log output.
    #[arg(long, env = "CHAT_LOG_FILE", default_value = "chatbot-client.log")]
    pub log_file: PathBuf,

    /// Name used when creating a session explicitly from the sidebar.
    #[arg(long, env = "CHAT_SESSION_NAME", default_value = DEFAULT_SESSION_NAME)]
    pub session_name: String,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub log_file: PathBuf,
    pub session_name: String,
}

impl ClientArgs {
    /// Validates the arguments. Fails when no API URL was given at all.
    pub fn into_config(self) -> Result<ClientConfig> {
        let Some(raw) = self.api_url else {
            bail!("CHAT_API_URL is not defined (set it in the environment, .env or --api-url)");
        };
        Ok(ClientConfig {
            api_url: normalize_base_url(&raw)?,
            log_file: self.log_file,
            session_name: self.session_name,
        })
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("CHAT_API_URL is empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("CHAT_API_URL must start with http:// or https://, got {trimmed:?}");
    }
    Ok(trimmed.to_string())
}

/// In-memory development backend speaking the chat API.
#[derive(Debug, Parser)]
#[command(name = "chatbot-devserver", version, about)]
pub struct DevServerArgs {
    #[arg(long, env = "CHAT_DEVSERVER_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Path prefix the chat routes are mounted under, e.g. /api
    #[arg(long, env = "CHAT_API_PREFIX", default_value = "")]
    pub api_prefix: String,
}
