//! Persisted field value
//!
//! The host stores the selection as a JSON array of category ids. Anything
//! else found in storage is reported as [`ParsedValue::Invalid`] and treated
//! as "nothing selected" so a corrupted value never breaks the field.

use crate::error::{PickerError, Result};
use serde::{Deserialize, Serialize};

/// Category ids in selection order
pub type Value = Vec<String>;

/// Outcome of reading the stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    /// No value has been stored yet
    Unset,
    /// Stored text is not a JSON array of strings
    Invalid,
    /// Stored ids, verbatim
    Ids(Value),
}

impl ParsedValue {
    /// Ids to pre-select; empty for unset and invalid values
    pub fn selected_ids(&self) -> &[String] {
        match self {
            ParsedValue::Ids(ids) => ids,
            ParsedValue::Unset | ParsedValue::Invalid => &[],
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ParsedValue::Invalid)
    }

    /// Strict view: invalid values become an error
    pub fn into_result(self) -> Result<Option<Value>> {
        match self {
            ParsedValue::Unset => Ok(None),
            ParsedValue::Invalid => Err(PickerError::InvalidPersistedValue),
            ParsedValue::Ids(ids) => Ok(Some(ids)),
        }
    }
}

/// Parse the raw stored value
///
/// No normalization: order and duplicates are kept as stored.
pub fn parse_value(raw: Option<&str>) -> ParsedValue {
    let Some(raw) = raw else {
        return ParsedValue::Unset;
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(ids) => ParsedValue::Ids(ids),
        Err(_) => ParsedValue::Invalid,
    }
}

/// Encode ids for storage
pub fn serialize_value(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Payload handed to the host value setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueUpdate {
    pub value_key: Value,
}

impl ValueUpdate {
    pub fn new(value_key: Value) -> Self {
        Self { value_key }
    }
}
