//! Error types for the commerce client

use thiserror::Error;

/// Commerce client error
///
/// Messages are meant to be shown to an editor as-is, so none of the
/// variants carry credentials or raw response bodies.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// A required configuration field is missing, not a string, or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The authorization endpoint rejected the credentials or was unreachable
    #[error("authentication failed")]
    Authentication,

    /// A category page request failed
    #[error("failed to fetch categories{}", status_suffix(.status))]
    Fetch { status: Option<u16> },

    /// Pagination ended on an empty page before reaching the reported total
    #[error("failed to fetch categories (received {received} of {total})")]
    Incomplete { received: u64, total: u64 },

    /// A category page arrived but could not be decoded
    #[error("failed to fetch categories (invalid response)")]
    InvalidResponse,

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl CommerceError {
    /// Fetch failure that never got a status line back
    pub fn transport() -> Self {
        CommerceError::Fetch { status: None }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Result type for commerce client operations
pub type Result<T> = std::result::Result<T, CommerceError>;
