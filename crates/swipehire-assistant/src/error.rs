//! Error types for swipehire-assistant

use thiserror::Error;

/// Result type alias using swipehire-assistant Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the assistant gateway.
///
/// Every variant here is fatal for the current turn. Recoverable problems
/// (an event line or chart directive that fails to parse) never surface as
/// errors; they are logged and skipped inside the interpreter.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request or body read failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned 429
    #[error("{message}")]
    RateLimited { message: String },

    /// Upstream returned 402
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// Upstream returned another non-success status
    #[error("assistant error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Event framing gave up, e.g. the line buffer overflowed while waiting
    /// for a split JSON payload to complete
    #[error("event stream framing error: {0}")]
    Framing(String),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Map a non-success gateway response to an error.
    ///
    /// The upstream error message is forwarded verbatim when present;
    /// otherwise a status-specific default is used.
    pub fn from_status(status: u16, upstream_message: Option<String>) -> Self {
        match status {
            429 => Error::RateLimited {
                message: upstream_message
                    .unwrap_or_else(|| "Rate limit exceeded. Please try again later.".into()),
            },
            402 => Error::QuotaExceeded {
                message: upstream_message
                    .unwrap_or_else(|| "Usage limit reached. Please add credits.".into()),
            },
            _ => Error::Upstream {
                status,
                message: upstream_message.unwrap_or_else(|| "AI service error".into()),
            },
        }
    }

    /// Check if this error indicates the caller should slow down before
    /// retrying
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}
