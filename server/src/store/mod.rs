//! Document store for todos.
//!
//! # Design
//! Handlers and the ordering engine only see the [`TodoStore`] trait, shared
//! as `Arc<dyn TodoStore>` through axum state. Each call is an independent
//! operation; nothing here groups several writes into a transaction.

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::model::{NewTodo, Todo, TodoId};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Failures of the underlying persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store data is corrupt: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new todo, assigning its id.
    async fn insert(&self, todo: NewTodo) -> StoreResult<Todo>;

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>>;

    /// Any todo currently holding `order`.
    async fn find_by_order(&self, order: i64) -> StoreResult<Option<Todo>>;

    /// The todo with the highest `order`, if the store is non-empty.
    async fn find_max_order(&self) -> StoreResult<Option<Todo>>;

    /// All todos, `order` descending.
    async fn list_by_order_desc(&self) -> StoreResult<Vec<Todo>>;

    /// Overwrite the stored document with the same id. Returns `false` when
    /// no such document exists.
    async fn save(&self, todo: &Todo) -> StoreResult<bool>;

    /// Hard delete. Returns `false` when no such document exists.
    async fn delete(&self, id: TodoId) -> StoreResult<bool>;
}

/// Where todos are kept.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    pub data_file: Option<PathBuf>,
}

/// Open the configured store.
///
/// A store that fails to open is logged and replaced by an empty in-memory
/// store so the server keeps answering requests.
pub async fn connect(config: &StoreConfig) -> Arc<dyn TodoStore> {
    let Some(path) = &config.data_file else {
        info!("using in-memory document store");
        return Arc::new(MemoryStore::new());
    };

    match FileStore::open(path).await {
        Ok(store) => {
            info!(path = %store.path().display(), "document store connected");
            Arc::new(store)
        }
        Err(e) => {
            error!(path = %path.display(), "document store connection failed: {e}");
            warn!("falling back to in-memory document store");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_without_file_is_in_memory() {
        let store = connect(&StoreConfig::default()).await;
        assert!(store.list_by_order_desc().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connect_falls_back_when_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, "not json").unwrap();

        let store = connect(&StoreConfig {
            data_file: Some(path.clone()),
        })
        .await;
        store
            .insert(NewTodo {
                value: "still works".to_string(),
                order: 1,
            })
            .await
            .unwrap();

        assert_eq!(store.list_by_order_desc().await.unwrap().len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }
}
