//! Error handling for the slotbook client

use std::fmt;
use thiserror::Error;

/// Unified error type for the slotbook client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The remote store answered with a non-success status
    #[error("Remote request failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    /// No booking could be located for the given identifier
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Every cancellation strategy failed
    #[error("Cancellation failed: {0}")]
    CancellationFailed(String),

    /// Identity provider errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Client-side validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// The HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error represents a clean HTTP 404 from the store
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
