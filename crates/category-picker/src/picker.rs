//! Picker controller
//!
//! Owns the state of one mounted selector: the load cycle outcome, the
//! teardown signal, and the display locale. Reads and writes the stored
//! value only through the [`Host`].

use crate::error::{PickerError, Result};
use crate::host::Host;
use crate::load::{run_load_cycle, CategorySource, LoadState};
use crate::selection::{filter_options, selected_options, to_value};
use crate::tree::FlatCategory;
use crate::value::{ParsedValue, ValueUpdate};
use commerce_client::{Category, CommerceClient, DEFAULT_LOCALE};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Signals teardown to a picker whose load may still be in flight
#[derive(Clone)]
pub struct TeardownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl TeardownHandle {
    pub fn teardown(&self) {
        // Stored even without receivers, so a later mount sees it too
        self.tx.send_replace(true);
    }
}

/// Category selector bound to a host
pub struct CategoryPicker<H> {
    host: H,
    state: LoadState,
    teardown: Arc<watch::Sender<bool>>,
    locale: String,
}

impl<H: Host> CategoryPicker<H> {
    pub fn new(host: H) -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            host,
            state: LoadState::Idle,
            teardown: Arc::new(tx),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Language tag used for labels and filtering
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Handle for interrupting [`mount`](Self::mount) from elsewhere
    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle {
            tx: Arc::clone(&self.teardown),
        }
    }

    /// Stop any in-flight load; its result is discarded
    pub fn teardown(&self) {
        self.teardown_handle().teardown();
    }

    /// Validate the host configuration and build the client for it
    pub fn source_from_host(&self) -> Result<CommerceClient> {
        let config = self.host.config().ok_or_else(|| {
            PickerError::InvalidConfiguration("no configuration supplied".to_string())
        })?;
        Ok(CommerceClient::from_host_config(&config)?)
    }

    /// Run the single load cycle against the host-configured backend
    ///
    /// Configuration problems fail the cycle before any request is made.
    pub async fn mount_from_host(&mut self) -> &LoadState {
        match self.source_from_host() {
            Ok(client) => self.mount(&client).await,
            Err(e) => {
                if self.state.begin() {
                    error!(error = %e, "Category picker configuration rejected");
                    self.state.finish(Err(e));
                }
                &self.state
            }
        }
    }

    /// Run the single load cycle against `source`
    ///
    /// Only the first call loads. A teardown while loading leaves the state
    /// untouched.
    pub async fn mount<S>(&mut self, source: &S) -> &LoadState
    where
        S: CategorySource + ?Sized,
    {
        if !self.state.begin() {
            debug!(state = ?self.state, "Category picker already mounted");
            return &self.state;
        }

        if self.host.value().is_invalid() {
            warn!("Stored value is not a list of category ids, showing no selection");
        }

        info!("Loading categories");
        match run_load_cycle(source, self.teardown.subscribe()).await {
            Err(PickerError::Cancelled) => {
                info!("Category load cancelled by teardown");
            }
            outcome => {
                if let Err(e) = &outcome {
                    error!(error = %e, "Category load failed");
                }
                self.state.finish(outcome);
            }
        }

        &self.state
    }

    /// Loaded options in display order
    pub fn options(&self) -> &[FlatCategory] {
        self.state.options()
    }

    /// Error message to show instead of the selector
    pub fn error_message(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn is_disabled(&self) -> bool {
        self.host.is_disabled()
    }

    /// Stored value as the host currently reports it
    pub fn value(&self) -> ParsedValue {
        self.host.value()
    }

    /// Options that the stored value marks as selected
    pub fn selected(&self) -> Vec<&FlatCategory> {
        let value = self.host.value();
        selected_options(self.options(), value.selected_ids())
    }

    /// Options matching a search query
    pub fn filter(&self, query: &str) -> Vec<&FlatCategory> {
        filter_options(self.options(), query, &self.locale)
    }

    /// Display label of a category in the picker locale
    pub fn label<'a>(&self, category: &'a Category) -> &'a str {
        category.label(&self.locale)
    }

    /// Persist a new selection; ignored while the host disables editing
    ///
    /// Returns whether the value was written.
    pub fn select<'a, I>(&self, selected: I) -> bool
    where
        I: IntoIterator<Item = &'a Category>,
    {
        if self.host.is_disabled() {
            debug!("Ignoring selection while disabled");
            return false;
        }

        let value = to_value(selected);
        debug!(count = value.len(), "Updating selected categories");
        self.host.set_value(ValueUpdate::new(value));
        true
    }
}
