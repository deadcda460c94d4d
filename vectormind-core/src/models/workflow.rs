use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved workflow plan. Rows are insert-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkflowRecord {
    pub id: i64,
    pub user_id: Option<String>,
    pub description: String,
    pub segment: Option<String>,
    pub plan: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; `id` and `created_at` are assigned on save.
#[derive(Debug, Clone)]
pub struct NewWorkflow {
    pub user_id: Option<String>,
    pub description: String,
    pub segment: Option<String>,
    pub plan: String,
}
