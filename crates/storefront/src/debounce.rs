//! Debounced search input.
//!
//! [`Debouncer`] runs an action after a quiet period; a newer call aborts the
//! pending one ("latest call wins"). [`LiveSearch`] uses it to recompute the
//! filtered catalog view as search text arrives, publishing each view on a
//! `watch` channel. Sort changes apply immediately.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use mini_shop_core::{Product, SortKey};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::shop::Shop;

/// Default quiet period for search input, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 150;

/// Default quiet period for search input.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS);

/// Delays an action until calls stop arriving for `delay`.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action`, superseding any call still waiting.
    pub fn call<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action().await;
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Default)]
struct Query {
    search: String,
    sort: SortKey,
}

/// Search-as-you-type over a shared [`Shop`].
#[derive(Debug)]
pub struct LiveSearch {
    shop: Arc<tokio::sync::Mutex<Shop>>,
    query: Arc<Mutex<Query>>,
    debouncer: Debouncer,
    results: watch::Sender<Vec<Product>>,
}

impl LiveSearch {
    /// Start with the unfiltered catalog as the current view.
    pub async fn new(shop: Arc<tokio::sync::Mutex<Shop>>, delay: Duration) -> Self {
        let initial = shop.lock().await.apply_filters("", SortKey::None);
        let (results, _) = watch::channel(initial);
        Self {
            shop,
            query: Arc::new(Mutex::new(Query::default())),
            debouncer: Debouncer::new(delay),
            results,
        }
    }

    /// Receive every recomputed view.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.results.subscribe()
    }

    /// The most recently published view.
    #[must_use]
    pub fn current(&self) -> Vec<Product> {
        self.results.borrow().clone()
    }

    /// Record new search text; the view updates after the quiet period.
    pub fn input(&self, search: &str) {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .search = search.to_owned();

        let shop = Arc::clone(&self.shop);
        let query = Arc::clone(&self.query);
        let results = self.results.clone();
        self.debouncer.call(move || refresh(shop, query, results));
    }

    /// Change the sort key and recompute immediately.
    pub async fn set_sort(&self, sort: SortKey) {
        self.query.lock().unwrap_or_else(PoisonError::into_inner).sort = sort;
        self.debouncer.cancel();
        refresh(
            Arc::clone(&self.shop),
            Arc::clone(&self.query),
            self.results.clone(),
        )
        .await;
    }
}

async fn refresh(
    shop: Arc<tokio::sync::Mutex<Shop>>,
    query: Arc<Mutex<Query>>,
    results: watch::Sender<Vec<Product>>,
) {
    let Query { search, sort } = query.lock().unwrap_or_else(PoisonError::into_inner).clone();
    let view = shop.lock().await.apply_filters(&search, sort);
    debug!(search = %search, %sort, results = view.len(), "Search view refreshed");
    results.send_replace(view);
}
