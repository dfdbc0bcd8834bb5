//! Client-credentials token exchange

use crate::client::CommerceClient;
use crate::error::{CommerceError, Result};
use crate::types::TokenResponse;
use base64::Engine;
use reqwest::header;
use std::fmt;
use tracing::{debug, warn};

/// Short-lived bearer token
///
/// Requested fresh for every load cycle and never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_in: None,
        }
    }

    /// Raw token string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Lifetime in seconds, as reported by the authorization server
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// `Basic` authorization header value for the client credentials
pub(crate) fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

impl CommerceClient {
    /// Exchange the configured client credentials for a bearer token
    ///
    /// Single attempt. Every failure collapses into
    /// [`CommerceError::Authentication`] so no server detail reaches the UI.
    pub async fn fetch_token(&self) -> Result<AccessToken> {
        let config = self.config();
        let scope = config.scope();

        let response = self
            .http()
            .post(&config.auth_url)
            .header(
                header::AUTHORIZATION,
                basic_credentials(&config.client_id, &config.client_secret),
            )
            .form(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token request could not be sent");
                CommerceError::Authentication
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Token request rejected");
            return Err(CommerceError::Authentication);
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Token response was not valid JSON");
            CommerceError::Authentication
        })?;

        let value = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!("Token response did not contain access_token");
                CommerceError::Authentication
            })?;

        debug!(expires_in = ?body.expires_in, "Obtained access token");

        Ok(AccessToken {
            value,
            expires_in: body.expires_in,
        })
    }
}
