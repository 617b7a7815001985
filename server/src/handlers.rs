//! Route handlers for `/api`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::{NewTodo, Todo, TodoId, TodoView};
use crate::validation::{CreateTodoInput, Schema, UpdateTodoInput};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedTodo {
    pub todo: TodoView,
}

#[derive(Debug, Serialize)]
pub struct TodoList {
    pub todos: Vec<TodoView>,
}

/// `{}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Empty {}

pub async fn health() -> Json<Greeting> {
    Json(Greeting {
        message: "Hi!".to_string(),
    })
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedTodo>), ApiError> {
    let CreateTodoInput { value } = validate::<CreateTodoInput>(payload)?;
    if value.is_empty() {
        return Err(ApiError::EmptyValue);
    }

    let order = state.ordering.next_order().await?;
    let todo = state.store.insert(NewTodo { value, order }).await?;
    info!(id = %todo.id, order = todo.order, "created todo");

    Ok((
        StatusCode::CREATED,
        Json(CreatedTodo { todo: todo.into() }),
    ))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    let todos = state.store.list_by_order_desc().await?;
    Ok(Json(TodoList {
        todos: todos.into_iter().map(TodoView::from).collect(),
    }))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Empty>, ApiError> {
    // An unknown id is reported before anything wrong with the body.
    let mut todo = find_todo(&state, &id).await?;
    let input: UpdateTodoInput = validate(payload)?;

    if let Some(order) = input.order {
        state.ordering.reorder(&mut todo, order).await?;
    }
    if let Some(done) = input.done {
        todo.done_at = done.then(Utc::now);
    }
    if let Some(value) = input.value {
        todo.value = value;
    }

    if !state.store.save(&todo).await? {
        return Err(ApiError::NotFound);
    }
    info!(id = %todo.id, order = todo.order, done = todo.done_at.is_some(), "updated todo");
    Ok(Json(Empty {}))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Empty>, ApiError> {
    let todo = find_todo(&state, &id).await?;
    if !state.store.delete(todo.id).await? {
        return Err(ApiError::NotFound);
    }
    info!(id = %todo.id, "deleted todo");
    Ok(Json(Empty {}))
}

fn validate<T: Schema>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    T::validate(&payload).map_err(|e| {
        debug!(schema = T::NAME, "rejected payload: {e}");
        ApiError::from(e)
    })
}

/// Ids that do not parse cannot exist, so they are reported as not found.
async fn find_todo(state: &AppState, id: &str) -> Result<Todo, ApiError> {
    let id: TodoId = id.parse().map_err(|_| ApiError::NotFound)?;
    state.store.find_by_id(id).await?.ok_or(ApiError::NotFound)
}
