//! Error types for the KidZone client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket connection could not be established or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Gave up reconnecting
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Staff console input that does not parse
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
