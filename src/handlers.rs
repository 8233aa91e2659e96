use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::auth::AuthUser;
use crate::domain;
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::models::{CreateTodoRequest, ListParams, UpdateTodoRequest};
use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = domain::create(state.store.as_ref(), &user_id, input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(mut params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    // The default view shows incomplete todos only; an explicit value,
    // valid or not, passes through to the tri-state filter untouched.
    if params.completed.is_none() {
        params.completed = Some("false".to_string());
    }
    let todos = domain::list(state.store.as_ref(), &user_id, &params).await?;
    Ok(Json(todos))
}

/// `GET /todos/completed` — same query surface, but `completed` is forced
/// to `"true"` regardless of what the caller supplied.
pub async fn list_completed(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(mut params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    params.completed = Some("true".to_string());
    let todos = domain::list(state.store.as_ref(), &user_id, &params).await?;
    Ok(Json(todos))
}

pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = domain::update(state.store.as_ref(), &user_id, &id, input).await?;
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = domain::delete(state.store.as_ref(), &user_id, &id).await?;
    Ok(Json(todo))
}
