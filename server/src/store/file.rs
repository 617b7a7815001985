use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{MemoryStore, StoreError, StoreResult, TodoStore};
use crate::model::{NewTodo, Todo, TodoId};

/// A [`MemoryStore`] mirrored to a JSON document file.
///
/// The file holds an array of todos. It is read once at open and rewritten
/// on every mutation by writing a sibling temp file and renaming it over the
/// original. A mutation reaches memory only after the file write succeeded,
/// so a failed write leaves both unchanged.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    mem: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Load `path`, or start empty when it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let todos = match tokio::fs::read(&path).await {
            Ok(bytes) => parse_documents(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = todos.len(), "loaded todo documents");

        Ok(Self {
            path,
            mem: MemoryStore::from_todos(todos),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, todos: &[Todo]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(todos)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn parse_documents(bytes: &[u8]) -> StoreResult<Vec<Todo>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let todos: Vec<Todo> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::new();
    for todo in &todos {
        if !seen.insert(todo.id) {
            return Err(StoreError::Corrupt(format!("duplicate id {}", todo.id)));
        }
    }
    Ok(todos)
}

#[async_trait]
impl TodoStore for FileStore {
    async fn insert(&self, todo: NewTodo) -> StoreResult<Todo> {
        let _guard = self.write_lock.lock().await;
        let todo = Todo {
            id: TodoId::new(),
            value: todo.value,
            order: todo.order,
            done_at: None,
        };
        let mut next = self.mem.snapshot().await;
        next.push(todo.clone());
        self.persist(&next).await?;
        self.mem.put(todo.clone()).await;
        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        self.mem.find_by_id(id).await
    }

    async fn find_by_order(&self, order: i64) -> StoreResult<Option<Todo>> {
        self.mem.find_by_order(order).await
    }

    async fn find_max_order(&self) -> StoreResult<Option<Todo>> {
        self.mem.find_max_order().await
    }

    async fn list_by_order_desc(&self) -> StoreResult<Vec<Todo>> {
        self.mem.list_by_order_desc().await
    }

    async fn save(&self, todo: &Todo) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.mem.snapshot().await;
        let Some(slot) = next.iter_mut().find(|t| t.id == todo.id) else {
            return Ok(false);
        };
        *slot = todo.clone();
        self.persist(&next).await?;
        self.mem.save(todo).await
    }

    async fn delete(&self, id: TodoId) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.mem.snapshot().await;
        let before = next.len();
        next.retain(|t| t.id != id);
        if next.len() == before {
            return Ok(false);
        }
        self.persist(&next).await?;
        self.mem.delete(id).await
    }
}
