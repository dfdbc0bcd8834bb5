//! Load cycle: fetch, build, flatten
//!
//! One cycle runs strictly in sequence (token, then each page, then the
//! synchronous tree work) and can be interrupted by the picker's teardown
//! signal at any await point.

use crate::error::{PickerError, Result};
use crate::tree::{CategoryTree, FlatCategory};
use async_trait::async_trait;
use commerce_client::{Category, CommerceClient, CommerceError};
use tokio::sync::watch;
use tracing::{debug, info};

/// Anything that can produce the complete category set for one cycle
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn load_categories(&self) -> std::result::Result<Vec<Category>, CommerceError>;
}

#[async_trait]
impl CategorySource for CommerceClient {
    async fn load_categories(&self) -> std::result::Result<Vec<Category>, CommerceError> {
        CommerceClient::load_categories(self).await
    }
}

/// Where the picker is in its single load cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Not mounted yet
    #[default]
    Idle,
    /// Waiting on the network
    Loading,
    /// Options ready for display
    Ready(Vec<FlatCategory>),
    /// Load failed; holds the message shown to the editor
    Failed(String),
}

impl LoadState {
    /// idle -> loading; false if a cycle already started
    pub fn begin(&mut self) -> bool {
        if *self == LoadState::Idle {
            *self = LoadState::Loading;
            true
        } else {
            false
        }
    }

    /// loading -> ready | failed; ignored in any other state
    pub fn finish(&mut self, outcome: Result<Vec<FlatCategory>>) {
        if *self != LoadState::Loading {
            return;
        }
        *self = match outcome {
            Ok(options) => LoadState::Ready(options),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        *self == LoadState::Loading
    }

    /// Loaded options; empty unless ready
    pub fn options(&self) -> &[FlatCategory] {
        match self {
            LoadState::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Run one load cycle against `source`
///
/// Returns [`PickerError::Cancelled`] as soon as `teardown` flips to true
/// or its sender goes away; the in-flight request is dropped with it.
pub async fn run_load_cycle<S>(
    source: &S,
    mut teardown: watch::Receiver<bool>,
) -> Result<Vec<FlatCategory>>
where
    S: CategorySource + ?Sized,
{
    if *teardown.borrow() {
        return Err(PickerError::Cancelled);
    }

    let categories = tokio::select! {
        result = source.load_categories() => result?,
        _ = teardown.wait_for(|torn_down| *torn_down) => {
            debug!("Teardown during category load");
            return Err(PickerError::Cancelled);
        }
    };

    let tree = CategoryTree::build(categories);
    let options = tree.flatten();
    info!(
        categories = options.len(),
        roots = tree.roots().len(),
        "Category tree ready"
    );
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct StaticSource {
        categories: Vec<Category>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl CategorySource for StaticSource {
        async fn load_categories(&self) -> std::result::Result<Vec<Category>, CommerceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.categories.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CategorySource for FailingSource {
        async fn load_categories(&self) -> std::result::Result<Vec<Category>, CommerceError> {
            Err(CommerceError::Authentication)
        }
    }

    struct SlowSource;

    #[async_trait]
    impl CategorySource for SlowSource {
        async fn load_categories(&self) -> std::result::Result<Vec<Category>, CommerceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut state = LoadState::default();
        state.finish(Ok(Vec::new()));
        assert_eq!(state, LoadState::Idle);

        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.is_loading());

        state.finish(Err(PickerError::Authentication));
        assert_eq!(state.error(), Some("Authentication failed"));

        state.finish(Ok(Vec::new()));
        assert!(state.error().is_some());
    }

    #[tokio::test]
    async fn test_cycle_builds_flat_options() {
        let source = StaticSource {
            categories: vec![
                Category::new("2").with_parent("1"),
                Category::new("1"),
            ],
            calls: AtomicU32::new(0),
        };
        let (_tx, rx) = watch::channel(false);

        let options = tokio_test::assert_ok!(run_load_cycle(&source, rx).await);
        let ids: Vec<_> = options.iter().map(|o| (o.category.id.as_str(), o.depth)).collect();
        assert_eq!(ids, vec![("1", 0), ("2", 1)]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cycle_failure() {
        let (_tx, rx) = watch::channel(false);
        let err = run_load_cycle(&FailingSource, rx).await.unwrap_err();
        assert_eq!(err, PickerError::Authentication);
    }

    #[tokio::test]
    async fn test_teardown_cancels_in_flight_load() {
        let (tx, rx) = watch::channel(false);
        let cycle = tokio::spawn(async move { run_load_cycle(&SlowSource, rx).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send(true).unwrap();

        let outcome = tokio::time::timeout(Duration::from_secs(5), cycle)
            .await
            .expect("cycle did not stop")
            .unwrap();
        assert_eq!(outcome, Err(PickerError::Cancelled));
    }

    #[tokio::test]
    async fn test_already_torn_down() {
        let source = StaticSource {
            categories: Vec::new(),
            calls: AtomicU32::new(0),
        };
        let (_tx, rx) = watch::channel(true);
        assert_eq!(run_load_cycle(&source, rx).await, Err(PickerError::Cancelled));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_sender_cancels() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        assert_eq!(run_load_cycle(&SlowSource, rx).await, Err(PickerError::Cancelled));
    }
}
