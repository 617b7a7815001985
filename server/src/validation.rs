//! Request payload validation.
//!
//! # Design
//! Handlers receive bodies as raw `serde_json::Value` and check them against a
//! named [`Schema`] before touching the store. A schema turns the raw payload
//! into a typed input or fails with a [`ValidationError`] whose message is
//! shown to the client as-is.

use serde_json::{Map, Value};

/// Longest accepted todo value, in characters.
pub const MAX_VALUE_LEN: usize = 50;

/// Highest order a client may request (2^53 - 1, exact in every JSON number
/// implementation). New todos take `max + 1`, so this leaves room above it.
pub const MAX_ORDER: i64 = 9_007_199_254_740_991;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A named payload shape.
pub trait Schema: Sized {
    const NAME: &'static str;

    fn validate(payload: &Value) -> Result<Self, ValidationError>;
}

/// Validated body of `POST /api/todos`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTodoInput {
    pub value: String,
}

impl Schema for CreateTodoInput {
    const NAME: &'static str = "create-todo";

    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(payload)?;
        if let Some(key) = fields.keys().find(|k| k.as_str() != "value") {
            return Err(ValidationError::new(format!("\"{key}\" is not allowed")));
        }
        let value = match fields.get("value") {
            None => return Err(ValidationError::new("\"value\" is required")),
            Some(v) => todo_value(v)?,
        };
        Ok(Self { value })
    }
}

/// Validated body of `PATCH /api/todos/{id}`. Every field is optional and
/// unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateTodoInput {
    pub order: Option<i64>,
    pub done: Option<bool>,
    pub value: Option<String>,
}

impl Schema for UpdateTodoInput {
    const NAME: &'static str = "update-todo";

    fn validate(payload: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(payload)?;

        let order = match fields.get("order") {
            None | Some(Value::Null) => None,
            Some(v) => match v.as_i64() {
                Some(n) if n > MAX_ORDER => {
                    return Err(ValidationError::new(format!(
                        "\"order\" must be less than or equal to {MAX_ORDER}"
                    )))
                }
                Some(n) if n > 0 => Some(n),
                _ => {
                    return Err(ValidationError::new(
                        "\"order\" must be a positive integer",
                    ))
                }
            },
        };

        // An explicit null un-completes the todo, same as false.
        let done = match fields.get("done") {
            None => None,
            Some(Value::Null) => Some(false),
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => return Err(ValidationError::new("\"done\" must be a boolean")),
        };

        let value = match fields.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => Some(todo_value(v)?),
        };

        Ok(Self { order, done, value })
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::new("\"value\" must be of type object"))
}

fn todo_value(v: &Value) -> Result<String, ValidationError> {
    let Value::String(s) = v else {
        return Err(ValidationError::new("\"value\" must be a string"));
    };
    if s.is_empty() {
        return Err(ValidationError::new("\"value\" is not allowed to be empty"));
    }
    if s.chars().count() > MAX_VALUE_LEN {
        return Err(ValidationError::new(format!(
            "\"value\" length must be less than or equal to {MAX_VALUE_LEN} characters long"
        )));
    }
    Ok(s.clone())
}
