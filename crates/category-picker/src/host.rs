//! Host environment interface
//!
//! The content platform owns configuration, the disabled flag, and the
//! stored value. The picker only reads them and proposes new values.

use crate::value::{parse_value, serialize_value, ParsedValue, ValueUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// What the picker needs from the embedding page
pub trait Host {
    /// Configuration object supplied by the host, if any
    fn config(&self) -> Option<serde_json::Value>;

    /// Stored value as raw text; `None` when nothing is stored
    fn raw_value(&self) -> Option<String>;

    /// Propose a new value
    fn set_value(&self, update: ValueUpdate);

    /// Whether editing is currently disabled
    fn is_disabled(&self) -> bool;

    /// Stored value, parsed
    fn value(&self) -> ParsedValue {
        parse_value(self.raw_value().as_deref())
    }
}

/// Host backed by memory, for embedding without a platform and for tests
pub struct InMemoryHost {
    config: Option<serde_json::Value>,
    value: Mutex<Option<String>>,
    disabled: AtomicBool,
}

impl InMemoryHost {
    pub fn new(config: serde_json::Value) -> Self {
        Self {
            config: Some(config),
            value: Mutex::new(None),
            disabled: AtomicBool::new(false),
        }
    }

    /// Host that supplies no configuration at all
    pub fn unconfigured() -> Self {
        Self {
            config: None,
            value: Mutex::new(None),
            disabled: AtomicBool::new(false),
        }
    }

    /// Seed the stored value with raw text
    pub fn with_raw_value(self, raw: impl Into<String>) -> Self {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
        self
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }
}

impl Host for InMemoryHost {
    fn config(&self) -> Option<serde_json::Value> {
        self.config.clone()
    }

    fn raw_value(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_value(&self, update: ValueUpdate) {
        match serialize_value(&update.value_key) {
            Ok(raw) => *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw),
            Err(e) => warn!(error = %e, "Could not encode value"),
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let host = InMemoryHost::new(serde_json::json!({}));
        assert_eq!(host.value(), ParsedValue::Unset);

        host.set_value(ValueUpdate::new(vec!["a".to_string()]));
        assert_eq!(host.raw_value().as_deref(), Some(r#"["a"]"#));
        assert_eq!(host.value().selected_ids(), ["a"]);
    }

    #[test]
    fn test_corrupted_value() {
        let host = InMemoryHost::unconfigured().with_raw_value("{broken");
        assert!(host.value().is_invalid());
        assert!(host.config().is_none());
    }
}
