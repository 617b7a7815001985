//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Successful bodies are unwrapped from the
//! server's envelopes (`{"todo": ..}`, `{"todos": [..]}`).

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateTodo, ErrorBody, Greeting, Todo, TodoEnvelope, TodoListEnvelope, UpdateTodo,
};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api".to_string(), None)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/todos".to_string(), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/api/todos".to_string(), Some(body)))
    }

    pub fn build_update_todo(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Patch, format!("/api/todos/{id}"), Some(body)))
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/api/todos/{id}"), None)
    }

    /// Returns the greeting message.
    pub fn parse_health(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        let greeting: Greeting = decode(&response)?;
        Ok(greeting.message)
    }

    /// Todos in display order (`order` descending).
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        let envelope: TodoListEnvelope = decode(&response)?;
        Ok(envelope.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        let envelope: TodoEnvelope = decode(&response)?;
        Ok(envelope.todo)
    }

    /// The server answers an update with `{}`; list again to see the result.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|b| b.error_message)
        .unwrap_or_else(|_| response.body.clone());
    match response.status {
        404 => Err(ApiError::NotFound { message }),
        400 => Err(ApiError::BadRequest { message }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_health_targets_api_root() {
        let req = client().build_health();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api");
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = CreateTodo {
            value: "Buy milk".to_string(),
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"value": "Buy milk"}));
    }

    #[test]
    fn build_update_todo_sends_only_present_fields() {
        let input = UpdateTodo {
            order: Some(3),
            done: None,
            value: None,
        };
        let req = client().build_update_todo(Uuid::nil(), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/todos/00000000-0000-0000-0000-000000000000"
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"order": 3}));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.method.as_str(), "DELETE");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_health_success() {
        let greeting = client()
            .parse_health(response(200, r#"{"message":"Hi!"}"#))
            .unwrap();
        assert_eq!(greeting, "Hi!");
    }

    #[test]
    fn parse_list_todos_success() {
        let body = r#"{"todos":[
            {"id":"00000000-0000-0000-0000-000000000002","todoId":"00000000-0000-0000-0000-000000000002","value":"B","order":2,"doneAt":"2024-05-01T10:00:00Z"},
            {"id":"00000000-0000-0000-0000-000000000001","todoId":"00000000-0000-0000-0000-000000000001","value":"A","order":1,"doneAt":null}
        ]}"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].value, "B");
        assert!(todos[0].is_done());
        assert!(!todos[1].is_done());
    }

    #[test]
    fn parse_create_todo_unwraps_envelope() {
        let body = r#"{"todo":{"id":"00000000-0000-0000-0000-000000000001","value":"New","order":1,"doneAt":null}}"#;
        let todo = client().parse_create_todo(response(201, body)).unwrap();
        assert_eq!(todo.value, "New");
        assert_eq!(todo.order, 1);
    }

    #[test]
    fn parse_create_todo_bad_request_carries_message() {
        let body = r#"{"errorMessage":"\"value\" is required"}"#;
        let err = client().parse_create_todo(response(400, body)).unwrap_err();
        match err {
            ApiError::BadRequest { message } => assert_eq!(message, "\"value\" is required"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, r#"{"errorMessage":"internal server error"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_and_delete_success() {
        assert!(client().parse_update_todo(response(200, "{}")).is_ok());
        assert!(client().parse_delete_todo(response(200, "{}")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client()
            .parse_delete_todo(response(404, r#"{"errorMessage":"todo does not exist"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "todo does not exist"));
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        let err = client().parse_update_todo(response(404, "nope")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref message } if message == "nope"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/api/todos");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
