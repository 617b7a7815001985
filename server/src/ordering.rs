//! Assignment and swapping of the `order` field.
//!
//! # Design
//! New todos go to the end of the order (`max + 1`, or `1` in an empty
//! store). Moving a todo to an occupied position swaps the two values instead
//! of shifting every todo in between, so only two documents are written.
//!
//! Neither operation is atomic. Create reads the maximum and then inserts; a
//! reorder saves the displaced todo before the caller saves the moved one.
//! Concurrent requests touching the same positions can leave two todos sharing
//! an order value, or a partial failure between the two writes can leave a
//! value unheld. Ordering here is best-effort.

use std::sync::Arc;

use tracing::debug;

use crate::model::{Todo, TodoId};
use crate::store::{StoreError, StoreResult, TodoStore};

#[derive(Clone)]
pub struct OrderingEngine {
    store: Arc<dyn TodoStore>,
}

impl OrderingEngine {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Order for a todo about to be created.
    pub async fn next_order(&self) -> StoreResult<i64> {
        match self.store.find_max_order().await? {
            None => Ok(1),
            Some(t) => t.order.checked_add(1).ok_or_else(|| {
                StoreError::Corrupt(format!("no order left above {}", t.order))
            }),
        }
    }

    /// Move `todo` to `target`.
    ///
    /// Whichever other todo holds `target` is given `todo`'s current order
    /// and saved immediately. `todo` itself is only updated in memory; the
    /// caller persists it. Returns the id of the displaced todo, if any.
    pub async fn reorder(&self, todo: &mut Todo, target: i64) -> StoreResult<Option<TodoId>> {
        if todo.order == target {
            return Ok(None);
        }

        let displaced = match self.store.find_by_order(target).await? {
            Some(mut other) if other.id != todo.id => {
                other.order = todo.order;
                self.store.save(&other).await?;
                debug!(moved = %todo.id, displaced = %other.id, from = todo.order, to = target, "swapped todo order");
                Some(other.id)
            }
            _ => {
                debug!(moved = %todo.id, from = todo.order, to = target, "moved todo to free order");
                None
            }
        };

        todo.order = target;
        Ok(displaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTodo;
    use crate::store::MemoryStore;

    async fn seeded(values: &[&str]) -> (Arc<MemoryStore>, OrderingEngine, Vec<Todo>) {
        let store = Arc::new(MemoryStore::new());
        let engine = OrderingEngine::new(store.clone());
        let mut todos = Vec::new();
        for value in values {
            let order = engine.next_order().await.unwrap();
            let todo = store
                .insert(NewTodo {
                    value: value.to_string(),
                    order,
                })
                .await
                .unwrap();
            todos.push(todo);
        }
        (store, engine, todos)
    }

    #[tokio::test]
    async fn first_todo_gets_order_one() {
        let (_, engine, _) = seeded(&[]).await;
        assert_eq!(engine.next_order().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn next_order_follows_the_maximum_not_the_count() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(NewTodo {
                value: "far".to_string(),
                order: 41,
            })
            .await
            .unwrap();
        let engine = OrderingEngine::new(store);
        assert_eq!(engine.next_order().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn next_order_fails_instead_of_overflowing() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(NewTodo {
                value: "top".to_string(),
                order: i64::MAX,
            })
            .await
            .unwrap();
        let engine = OrderingEngine::new(store);
        let err = engine.next_order().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn sequential_creates_are_dense() {
        let (_, _, todos) = seeded(&["A", "B", "C"]).await;
        let orders: Vec<i64> = todos.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn reorder_swaps_with_holder() {
        let (store, engine, todos) = seeded(&["A", "B", "C"]).await;
        let (a, b, mut c) = (todos[0].clone(), todos[1].clone(), todos[2].clone());

        let displaced = engine.reorder(&mut c, 1).await.unwrap();
        store.save(&c).await.unwrap();

        assert_eq!(displaced, Some(a.id));
        let listed: Vec<(String, i64)> = store
            .list_by_order_desc()
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.value, t.order))
            .collect();
        assert_eq!(
            listed,
            vec![("A".to_string(), 3), ("B".to_string(), 2), ("C".to_string(), 1)]
        );
        assert_eq!(store.find_by_id(b.id).await.unwrap().unwrap().order, 2);
    }

    #[tokio::test]
    async fn reorder_to_free_position_only_moves_target() {
        let (store, engine, todos) = seeded(&["A", "B"]).await;
        let mut a = todos[0].clone();

        let displaced = engine.reorder(&mut a, 10).await.unwrap();
        assert_eq!(displaced, None);
        assert_eq!(a.order, 10);
        // Not saved yet: the store still holds the old value.
        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().order, 1);
    }

    #[tokio::test]
    async fn reorder_to_own_position_is_a_no_op() {
        let (store, engine, todos) = seeded(&["A", "B"]).await;
        let mut b = todos[1].clone();

        assert_eq!(engine.reorder(&mut b, 2).await.unwrap(), None);
        assert_eq!(b.order, 2);
        assert_eq!(store.find_by_id(todos[0].id).await.unwrap().unwrap().order, 1);
    }
}
