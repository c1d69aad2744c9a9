//! Request handlers.
//!
//! Each handler maps one route onto one lifecycle service call. Body and
//! path extraction failures are converted into validation errors instead of
//! axum's plain-text rejections.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use super::{
    AppState,
    dto::{CreateTaskBody, HealthResponse, TaskResponse, UpdateTaskBody},
    error::ApiErrorResponse,
};
use crate::task::domain::TaskId;

type HandlerResult<T> = Result<T, ApiErrorResponse>;

fn task_id(path: Result<Path<Uuid>, PathRejection>) -> HandlerResult<TaskId> {
    let Path(id) = path?;
    Ok(TaskId::from_uuid(id))
}

/// `POST /tasks`: creates a task and returns it with `201 Created`.
///
/// # Errors
///
/// Returns `400` for a malformed body, a mistyped field, a missing title,
/// or an invalid title, and `500` when storage fails.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<TaskResponse>)> {
    let Json(raw) = body?;
    let request = CreateTaskBody::try_from(raw)?
        .into_request()
        .ok_or_else(|| ApiErrorResponse::missing_field("title"))?;
    let task = state.tasks.create(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `GET /tasks`: lists every task, newest first.
///
/// # Errors
///
/// Returns `500` when storage fails.
pub async fn list_tasks(State(state): State<AppState>) -> HandlerResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/{task_id}`: fetches one task.
///
/// # Errors
///
/// Returns `400` for a non-UUID id, `404` for an unknown task, and `500`
/// when storage fails.
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<Json<TaskResponse>> {
    let id = task_id(path)?;
    let task = state.tasks.get(id).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PUT /tasks/{task_id}`: applies a partial update.
///
/// # Errors
///
/// Returns `400` for a non-UUID id, a malformed body, or an invalid field,
/// `404` for an unknown task, and `500` when storage fails.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Json<TaskResponse>> {
    let id = task_id(path)?;
    let Json(raw) = body?;
    let changes = UpdateTaskBody::try_from(raw)?;
    let task = state.tasks.update(id, changes.into()).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `DELETE /tasks/{task_id}`: removes a task, answering `204 No Content`.
///
/// # Errors
///
/// Returns `400` for a non-UUID id, `404` for an unknown task, and `500`
/// when storage fails.
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<StatusCode> {
    let id = task_id(path)?;
    state.tasks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`: liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
    })
}
