/// Task CRUD endpoints
///
/// All routes here sit behind the identity layer: handlers receive the
/// resolved [`CurrentUser`] from request extensions. Listing and creation are
/// implicitly scoped to the caller; update and delete additionally pass the
/// ownership guard before touching the row.
///
/// # Endpoints
///
/// - `GET    /tasks` - List the caller's tasks, ascending by order value
/// - `POST   /tasks` - Create a task (status TODO, time-derived order)
/// - `PUT    /tasks/:id` - Partially update a task (owner only)
/// - `DELETE /tasks/:id` - Delete a task (owner only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{authorization, identity::CurrentUser},
    models::task::{CreateTask, Task, TaskStatus, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Partial update request
///
/// Any subset of fields may be supplied; omitted fields keep their prior
/// values.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New board column
    pub status: Option<TaskStatus>,

    /// New sort key
    pub order: Option<i64>,
}

/// Task representation returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// Board column
    pub status: TaskStatus,

    /// Sort key
    pub order: i64,

    /// Display name of the task's creator
    pub creator_name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TaskResponse {
    /// Builds the response from a task row and its creator's display name
    fn from_task(task: Task, creator_name: &str) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            order: task.task_order,
            creator_name: creator_name.to_string(),
            created_at: task.created_at,
        }
    }
}

/// Lists the caller's tasks
///
/// Returns exactly the tasks owned by the acting user, ascending by order
/// value. Scoping is done in the query; no ownership guard is needed.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_by_user(&state.db, current_user.id).await?;

    let response = tasks
        .into_iter()
        .map(|task| TaskResponse::from_task(task, &current_user.name))
        .collect();

    Ok(Json(response))
}

/// Creates a task for the caller
///
/// The task starts in `TODO` with a creation-time-derived order value, so it
/// sorts after the caller's existing tasks.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: current_user.id,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    Ok(Json(TaskResponse::from_task(task, &current_user.name)))
}

/// Partially updates a task
///
/// Only fields present in the request change; the ownership guard runs
/// before any write.
///
/// # Errors
///
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: caller does not own the task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let existing = Task::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorization::require_owner(&current_user.email, &existing.owner_email)?;

    let patch = UpdateTask {
        title: req.title,
        description: req.description,
        status: req.status,
        task_order: req.order,
    };

    let updated = if patch.is_empty() {
        // Nothing to change; echo the current row
        existing.task
    } else {
        Task::update(&state.db, id, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?
    };

    Ok(Json(TaskResponse::from_task(updated, &current_user.name)))
}

/// Deletes a task
///
/// # Errors
///
/// - `404 Not Found`: no task with that id
/// - `403 Forbidden`: caller does not own the task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let existing = Task::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorization::require_owner(&current_user.email, &existing.owner_email)?;

    Task::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
