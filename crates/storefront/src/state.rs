//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::blob::{BlobStore, FileBlobStore, MemoryBlobStore, StoreError};
use crate::config::StorefrontConfig;
use crate::quiz::{QuestionBank, Quiz, QuizError};
use crate::services::{JokeClient, JokeError};
use crate::shop::{Shop, ShopOptions};
use crate::todo::TodoList;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("question bank error: {0}")]
    Quiz(#[from] QuizError),
    #[error("joke client error: {0}")]
    Joke(#[from] JokeError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The shop sits behind its own
/// `Arc` so a [`LiveSearch`](crate::debounce::LiveSearch) can share it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: Arc<Mutex<Shop>>,
    todos: Mutex<TodoList>,
    quiz: Mutex<Quiz>,
    jokes: JokeClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cart lives in a file store under `data_dir` when configured, and in
    /// memory otherwise. The catalog is scoped to this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the question
    /// bank cannot be loaded, or the HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let device: Arc<dyn BlobStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileBlobStore::open(dir)?),
            None => Arc::new(MemoryBlobStore::new()),
        };
        let session = MemoryBlobStore::new();
        let shop = Shop::open(
            device,
            &session,
            ShopOptions {
                catalog_size: config.catalog_size,
                currency: config.currency,
            },
        );

        let bank = match &config.quiz_bank_path {
            Some(path) => QuestionBank::from_path(path)?,
            None => QuestionBank::builtin(),
        };
        let jokes = JokeClient::new(config.joke_api_url.clone())?;

        Ok(Self::from_parts(config, shop, Quiz::new(bank), jokes))
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(config: StorefrontConfig, shop: Shop, quiz: Quiz, jokes: JokeClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: Arc::new(Mutex::new(shop)),
                todos: Mutex::new(TodoList::new()),
                quiz: Mutex::new(quiz),
                jokes,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the shared shop.
    #[must_use]
    pub fn shop(&self) -> &Arc<Mutex<Shop>> {
        &self.inner.shop
    }

    #[must_use]
    pub fn todos(&self) -> &Mutex<TodoList> {
        &self.inner.todos
    }

    #[must_use]
    pub fn quiz(&self) -> &Mutex<Quiz> {
        &self.inner.quiz
    }

    /// Get a reference to the joke API client.
    #[must_use]
    pub fn jokes(&self) -> &JokeClient {
        &self.inner.jokes
    }
}
