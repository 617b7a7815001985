//! The todo document and its identifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned by the store when a todo is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A persisted todo.
///
/// `order` is unique among todos under sequential operation; listings sort it
/// descending. `done_at` is `None` while the todo is incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub value: String,
    pub order: i64,
    #[serde(default)]
    pub done_at: Option<DateTime<Utc>>,
}

/// Fields of a todo before the store has assigned it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub value: String,
    pub order: i64,
}

/// Response view of a todo. Adds `todoId`, an alias of `id` used by the
/// front-end assets.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,
    pub todo_id: TodoId,
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            todo_id: todo.id,
            todo,
        }
    }
}
