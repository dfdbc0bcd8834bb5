//! Client configuration
//!
//! The host hands over a loosely typed JSON object. It is validated once,
//! before a load cycle starts, and turned into a [`CommerceConfig`].

use crate::error::{CommerceError, Result};
use serde::Deserialize;
use std::fmt;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Required string fields, in the order they are checked
const REQUIRED_FIELDS: [&str; 5] = ["authUrl", "apiUrl", "projectKey", "clientId", "clientSecret"];

/// Connection settings for the commerce platform
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceConfig {
    /// OAuth token endpoint (client-credentials grant)
    pub auth_url: String,
    /// Base URL of the HTTP API, without the project key
    pub api_url: String,
    /// Project the categories belong to
    pub project_key: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Requested scope; derived from the project key when absent
    #[serde(default)]
    pub scope: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl CommerceConfig {
    /// Create a configuration from the five mandatory settings
    pub fn new(
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
        project_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            api_url: api_url.into(),
            project_key: project_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the requested scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Parse and validate a host-supplied configuration object
    ///
    /// Fails on the first required field that is missing or not a string.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            CommerceError::InvalidConfiguration("configuration must be an object".to_string())
        })?;

        for field in REQUIRED_FIELDS {
            match object.get(field) {
                Some(serde_json::Value::String(_)) => {}
                Some(_) => {
                    return Err(CommerceError::InvalidConfiguration(format!(
                        "{field} must be a string"
                    )))
                }
                None => {
                    return Err(CommerceError::InvalidConfiguration(format!(
                        "missing {field}"
                    )))
                }
            }
        }

        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| CommerceError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty settings and URLs without an HTTP scheme
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("authUrl", &self.auth_url),
            ("apiUrl", &self.api_url),
            ("projectKey", &self.project_key),
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CommerceError::InvalidConfiguration(format!(
                    "{name} must not be empty"
                )));
            }
        }

        for (name, url) in [("authUrl", &self.auth_url), ("apiUrl", &self.api_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CommerceError::InvalidConfiguration(format!(
                    "{name} must be an http(s) URL"
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(CommerceError::InvalidConfiguration(
                "timeoutSecs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Scope sent with the token request
    pub fn scope(&self) -> String {
        match &self.scope {
            Some(scope) => scope.clone(),
            None => {
                let key = &self.project_key;
                format!(
                    "view_products:{key} view_project_settings:{key} view_categories:{key}"
                )
            }
        }
    }

    /// Category collection endpoint for the configured project
    pub fn categories_url(&self) -> String {
        format!(
            "{}/{}/categories",
            self.api_url.trim_end_matches('/'),
            urlencoding::encode(&self.project_key)
        )
    }
}

impl fmt::Debug for CommerceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommerceConfig")
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("project_key", &self.project_key)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
