//! HTTP server exposing road snapping and step-by-step route searches

pub mod api;
pub mod cli;
pub mod config;
pub mod error;

pub use api::{AppState, app, router};
pub use cli::Cli;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
