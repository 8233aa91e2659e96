//! Per-user todo HTTP API.
//!
//! Thin access layer (axum routes + identity extraction) over a thin domain
//! layer (create/list/update/delete with an ownership gate), with all
//! persistence behind the [`store::TodoStore`] seam.

use std::sync::Arc;

use axum::routing::{get, patch};
use axum::Router;

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod query;
pub mod store;

use crate::error::ApiError;
use crate::store::TodoStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/todos/completed", get(handlers::list_completed))
        .route(
            "/todos/:id",
            patch(handlers::update_todo).delete(handlers::delete_todo),
        )
        .fallback(|| async { ApiError::NotFound })
        .with_state(state)
}
