//! Error types for the category picker

use commerce_client::CommerceError;
use thiserror::Error;

/// Result type for picker operations
pub type Result<T> = std::result::Result<T, PickerError>;

/// Picker error types
///
/// Every variant aborts the current load cycle; the display string is the
/// single message shown to the editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// Host configuration is missing a field or has a malformed one
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Credentials were rejected or the auth endpoint was unreachable
    #[error("Authentication failed")]
    Authentication,

    /// A category page request failed
    #[error("Failed to fetch categories: {0}")]
    Fetch(String),

    /// The HTTP client could not be set up
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    /// Stored field value is not a list of category ids
    #[error("Stored value is not a list of category ids")]
    InvalidPersistedValue,

    /// The new value could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The picker was torn down before the load cycle finished
    #[error("Load cancelled")]
    Cancelled,
}

impl From<CommerceError> for PickerError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::InvalidConfiguration(msg) => PickerError::InvalidConfiguration(msg),
            CommerceError::Authentication => PickerError::Authentication,
            CommerceError::Fetch { status: Some(status) } => {
                PickerError::Fetch(format!("HTTP {status}"))
            }
            CommerceError::Fetch { status: None } => {
                PickerError::Fetch("request failed".to_string())
            }
            CommerceError::Incomplete { received, total } => {
                PickerError::Fetch(format!("received {received} of {total}"))
            }
            CommerceError::InvalidResponse => PickerError::Fetch("invalid response".to_string()),
            CommerceError::Client(msg) => PickerError::ClientSetup(msg),
        }
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        PickerError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_commerce_error() {
        assert_eq!(
            PickerError::from(CommerceError::Authentication),
            PickerError::Authentication
        );
        assert_eq!(
            PickerError::from(CommerceError::Fetch { status: Some(500) }).to_string(),
            "Failed to fetch categories: HTTP 500"
        );
        assert!(matches!(
            PickerError::from(CommerceError::InvalidConfiguration("missing apiUrl".into())),
            PickerError::InvalidConfiguration(msg) if msg == "missing apiUrl"
        ));
    }

    #[test]
    fn test_client_setup_is_not_a_fetch_failure() {
        let err = PickerError::from(CommerceError::Client("no TLS backend".into()));
        assert_eq!(err, PickerError::ClientSetup("no TLS backend".into()));
        assert_eq!(err.to_string(), "HTTP client setup failed: no TLS backend");
    }

    #[test]
    fn test_pagination_failures() {
        assert_eq!(
            PickerError::from(CommerceError::Incomplete { received: 500, total: 900 }).to_string(),
            "Failed to fetch categories: received 500 of 900"
        );
        assert_eq!(
            PickerError::from(CommerceError::InvalidResponse).to_string(),
            "Failed to fetch categories: invalid response"
        );
    }
}
