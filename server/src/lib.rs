//! JSON todo list service.
//!
//! # Overview
//! Exposes create, list, update and delete of todos under `/api/todos`, plus a
//! `GET /api` greeting. Other paths are served from a static asset directory.
//!
//! # Design
//! - The store is opened once at startup and shared as `Arc<dyn TodoStore>`
//!   in [`AppState`]; handlers never reach for a global.
//! - Payloads are checked by [`validation`] before anything is written.
//! - [`ordering::OrderingEngine`] owns the `order` arithmetic.
//! - Every failure ends in [`error::ApiError`]'s `IntoResponse`, and a
//!   panic-catching layer turns handler panics into a 500 as well.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod store;
pub mod validation;

use std::path::Path;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};

pub use config::Config;
pub use error::ApiError;
pub use model::{Todo, TodoId};
pub use ordering::OrderingEngine;
pub use store::{FileStore, MemoryStore, StoreConfig, StoreError, TodoStore};

/// Shared per-request state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub ordering: OrderingEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            ordering: OrderingEngine::new(store.clone()),
            store,
        }
    }
}

/// Router over an empty in-memory store, serving assets from `./assets`.
pub fn app() -> Router {
    build_router(AppState::new(Arc::new(MemoryStore::new())), "./assets")
}

pub fn build_router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api", get(handlers::health))
        .route("/api/", get(handlers::health))
        .route(
            "/api/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/api/todos/{id}",
            patch(handlers::update_todo).delete(handlers::delete_todo),
        )
        .fallback_service(ServeDir::new(assets_dir))
        .layer(middleware::from_fn(logging::log_request))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
