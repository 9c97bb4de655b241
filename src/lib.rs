pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod state;
pub mod ui;
