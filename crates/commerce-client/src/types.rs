//! Wire types for the category API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language tag used for labels when the caller does not pick one
pub const DEFAULT_LOCALE: &str = "en-US";

/// Localized display text keyed by language tag (e.g. "en-US")
pub type LocalizedString = BTreeMap<String, String>;

/// Reference to another resource, as the API nests it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReference {
    /// Resource type, "category" for parent references
    #[serde(default)]
    pub type_id: String,
    /// Referenced identifier
    pub id: String,
}

/// A product category
///
/// Only the fields the selector needs are kept; anything else the API
/// returns is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryReference>,
}

impl Category {
    /// Create a bare category with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: None,
            name: None,
            parent: None,
        }
    }

    /// Set the parent reference
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent = Some(CategoryReference {
            type_id: "category".to_string(),
            id: parent_id.into(),
        });
        self
    }

    /// Set the key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a localized name
    pub fn with_name(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.name
            .get_or_insert_with(LocalizedString::new)
            .insert(locale.into(), text.into());
        self
    }

    /// Identifier of the declared parent, if any
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.id.as_str())
    }

    /// Display label: localized name, then key, then id
    pub fn label(&self, locale: &str) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.get(locale))
            .filter(|s| !s.is_empty())
            .or_else(|| self.key.as_ref().filter(|k| !k.is_empty()))
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }
}

/// One page of the paged category query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPage {
    /// Categories on this page
    #[serde(default)]
    pub results: Vec<Category>,
    /// Total number of categories in the project
    pub total: u64,
    /// Offset this page starts at
    #[serde(default)]
    pub offset: Option<u64>,
    /// Number of results on this page
    #[serde(default)]
    pub count: Option<u64>,
    /// Page size that was requested
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Response of the client-credentials grant
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
