//! Request handlers for the `/todos` resource.
//!
//! Each handler makes exactly one model call. An absent document becomes a
//! bare 404; a model failure leaves through `?` as an [`ApiError`] for the
//! error handler to render.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use todo_core::{Filter, Todo, TodoModel, UpdateOptions};

use crate::error::ApiError;

/// Shared handle to the data-access model.
pub type Model = Arc<dyn TodoModel>;

fn found_or_404(todo: Option<Todo>) -> Response {
    match todo {
        Some(todo) => (StatusCode::OK, Json(todo)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn list_todos(State(model): State<Model>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = model.find(Filter::new()).await?;
    Ok(Json(todos))
}

pub async fn get_todo(
    State(model): State<Model>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let todo = model.find_by_id(&id).await?;
    Ok(found_or_404(todo))
}

pub async fn create_todo(
    State(model): State<Model>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = model.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(model): State<Model>,
    Path(id): Path<String>,
    Json(update): Json<Value>,
) -> Result<Response, ApiError> {
    let todo = model
        .find_by_id_and_update(&id, update, UpdateOptions::RETURN_UPDATED)
        .await?;
    Ok(found_or_404(todo))
}

pub async fn delete_todo(
    State(model): State<Model>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let todo = model.find_by_id_and_delete(&id).await?;
    Ok(found_or_404(todo))
}
