use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreResult, TodoStore};
use crate::model::{NewTodo, Todo, TodoId};

/// Process-local store. Clones share the same documents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let docs = todos.into_iter().map(|t| (t.id, t)).collect();
        Self {
            docs: Arc::new(RwLock::new(docs)),
        }
    }

    /// Insert or replace a document as-is.
    pub(super) async fn put(&self, todo: Todo) {
        self.docs.write().await.insert(todo.id, todo);
    }

    /// Every document, `order` descending with ties broken by id.
    pub async fn snapshot(&self) -> Vec<Todo> {
        let docs = self.docs.read().await;
        let mut todos: Vec<Todo> = docs.values().cloned().collect();
        todos.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.id.cmp(&b.id)));
        todos
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> StoreResult<Todo> {
        let todo = Todo {
            id: TodoId::new(),
            value: todo.value,
            order: todo.order,
            done_at: None,
        };
        self.put(todo.clone()).await;
        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        Ok(self.docs.read().await.get(&id).cloned())
    }

    async fn find_by_order(&self, order: i64) -> StoreResult<Option<Todo>> {
        let docs = self.docs.read().await;
        Ok(docs.values().find(|t| t.order == order).cloned())
    }

    async fn find_max_order(&self) -> StoreResult<Option<Todo>> {
        let docs = self.docs.read().await;
        Ok(docs.values().max_by_key(|t| t.order).cloned())
    }

    async fn list_by_order_desc(&self) -> StoreResult<Vec<Todo>> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, todo: &Todo) -> StoreResult<bool> {
        let mut docs = self.docs.write().await;
        match docs.get_mut(&todo.id) {
            Some(doc) => {
                *doc = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: TodoId) -> StoreResult<bool> {
        Ok(self.docs.write().await.remove(&id).is_some())
    }
}
