//! Application state shared across handlers.

use std::sync::Arc;

use yumemaga_persistence::WorkflowStore;

use crate::config::ApiConfig;
use crate::error::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Workflow files.
    pub store: Arc<WorkflowStore>,
}

impl AppState {
    /// Creates state over a store.
    pub fn new(config: ApiConfig, store: WorkflowStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Creates state with a store rooted at `config.data_dir`.
    pub fn from_config(config: ApiConfig) -> Self {
        let store = WorkflowStore::new(config.data_dir.clone());
        Self::new(config, store)
    }

    /// Runs a store call on the blocking pool.
    ///
    /// The store holds a lock across file I/O, so it never runs on an
    /// async worker.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&WorkflowStore) -> yumemaga_persistence::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        Ok(tokio::task::spawn_blocking(move || f(&store)).await??)
    }
}
