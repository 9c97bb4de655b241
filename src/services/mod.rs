pub mod api_client;
pub mod chatbot;
pub mod session_manager;
