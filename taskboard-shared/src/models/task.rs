/// Task model and database operations
///
/// This module provides the Task model: a personal to-do item owned by
/// exactly one user, organized by status column and a manual ordering value.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('TODO', 'IN_PROGRESS', 'DONE');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'TODO',
///     task_order BIGINT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `task_order` is an opaque sort key: values need not be unique or
/// contiguous. New tasks get the current Unix time in milliseconds, so they
/// sort after existing tasks by default.
///
/// Ownership is immutable after creation: no operation changes `user_id`.
/// Updates are read-modify-write without an optimistic-concurrency check, so
/// concurrent updates to the same task are last-write-wins.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task, UpdateTask};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     user_id,
///     title: "Write the report".to_string(),
///     description: None,
/// }).await?;
///
/// // Move it to the in-progress column, leave everything else alone
/// Task::update(&pool, task.id, UpdateTask {
///     status: Some(taskboard_shared::models::task::TaskStatus::InProgress),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started yet (the status every task is created with)
    #[sqlx(rename = "TODO")]
    Todo,

    /// Currently being worked on
    #[sqlx(rename = "IN_PROGRESS")]
    InProgress,

    /// Finished
    #[sqlx(rename = "DONE")]
    Done,
}

impl TaskStatus {
    /// Gets the status as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

/// Task model representing a single board item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user; never changes after creation
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Board column
    pub status: TaskStatus,

    /// Opaque numeric sort key for display position
    pub task_order: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// A task joined with its owner's email, for ownership checks
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskWithOwner {
    /// The task row
    #[sqlx(flatten)]
    pub task: Task,

    /// Email of the owning user
    pub owner_email: String,
}

/// Input for creating a new task
///
/// Status and sort key are not caller-supplied: every task starts in `TODO`
/// with a creation-time-derived order value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Partial update for an existing task
///
/// All fields are optional; only non-None fields are applied. Omitted fields
/// retain their prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New board column
    pub status: Option<TaskStatus>,

    /// New sort key
    pub task_order: Option<i64>,
}

impl UpdateTask {
    /// Returns true when no field is set (the update would be a no-op)
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.task_order.is_none()
    }
}

impl Task {
    /// Creates a new task in the database
    ///
    /// The task starts in `TODO` with `task_order` set to the current Unix
    /// time in milliseconds, so it sorts after all previously created tasks.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status, task_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, status, task_order,
                      created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(TaskStatus::Todo)
        .bind(Utc::now().timestamp_millis())
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// Returns the task if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, task_order,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID together with its owner's email
    ///
    /// The ownership guard compares this email against the acting identity
    /// before any mutation.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TaskWithOwner>, sqlx::Error> {
        let row = sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT t.id, t.user_id, t.title, t.description, t.status, t.task_order,
                   t.created_at, t.updated_at, u.email AS owner_email
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Lists all tasks owned by a user, ascending by sort key
    ///
    /// Scoping happens in the query itself, never by post-hoc filtering.
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, task_order,
                   created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY task_order ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update to a task
    ///
    /// Only non-None fields in `data` are written; `updated_at` is always
    /// refreshed. There is no version check: concurrent updates to the same
    /// row are last-write-wins.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.task_order.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_order = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, user_id, title, description, status, task_order, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(task_order) = data.task_order {
            q = q.bind(task_order);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(TaskStatus::Todo.as_str(), "TODO");
        assert_eq!(TaskStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(TaskStatus::Done.as_str(), "DONE");
    }

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let status: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(status, TaskStatus::Done);
    }

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.is_empty());

        let update = UpdateTask {
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    // Database-backed coverage lives in taskboard-api/tests/api_integration.rs
}
