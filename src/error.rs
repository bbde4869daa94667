//! Error types for the homework bot

/// Errors that can occur while polling the review API or notifying the chat
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error(
        "the review API returned status {status} for GET {endpoint}?from_date={from_date}: {body}"
    )]
    Transport {
        status: u16,
        endpoint: String,
        from_date: i64,
        body: String,
    },

    #[error("Invalid API response: {0}")]
    Schema(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;
