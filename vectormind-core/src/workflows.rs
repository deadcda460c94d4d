//! Workflow store queries.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewWorkflow, WorkflowRecord};

/// Insert a new workflow and return its assigned id.
pub async fn save(pool: &SqlitePool, workflow: &NewWorkflow) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO workflows (user_id, description, segment, plan, created_at) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id",
    )
    .bind(&workflow.user_id)
    .bind(&workflow.description)
    .bind(&workflow.segment)
    .bind(&workflow.plan)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::info!(workflow_id = id, user_id = ?workflow.user_id, "workflow saved");
    Ok(id)
}

/// All workflows owned by `user_id`, newest first. Unknown users yield an
/// empty list.
pub async fn list_by_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<WorkflowRecord>, sqlx::Error> {
    sqlx::query_as::<_, WorkflowRecord>(
        "SELECT id, user_id, description, segment, plan, created_at \
         FROM workflows \
         WHERE user_id = ? \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<WorkflowRecord>, sqlx::Error> {
    sqlx::query_as::<_, WorkflowRecord>(
        "SELECT id, user_id, description, segment, plan, created_at \
         FROM workflows \
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
