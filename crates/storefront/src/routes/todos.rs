//! To-do list route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use mini_shop_core::TaskId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::todo::Task;

/// New task request body.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub text: String,
}

/// List tasks in the order they were added.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Task>> {
    let todos = state.todos().lock().await;
    Json(todos.tasks().to_vec())
}

/// Add a task.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>)> {
    let Json(body) = body?;
    let mut todos = state.todos().lock().await;
    let task = todos.add(&body.text)?.clone();
    Ok((StatusCode::CREATED, Json(task)))
}

/// Remove a task.
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id: TaskId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid task id: {id}")))?;
    state.todos().lock().await.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
