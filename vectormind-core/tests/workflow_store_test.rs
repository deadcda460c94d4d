//! Integration tests for the workflow store.
//!
//! Each test gets its own in-memory SQLite database with migrations applied,
//! so tests are fully isolated and need no external service.

use sqlx::SqlitePool;

use vectormind_core::config::DatabaseConfig;
use vectormind_core::{db, workflows, NewWorkflow};

async fn memory_pool() -> SqlitePool {
    db::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("in-memory database should open")
}

fn new_workflow(user_id: Option<&str>, description: &str) -> NewWorkflow {
    NewWorkflow {
        user_id: user_id.map(str::to_string),
        description: description.to_string(),
        segment: Some("agency".to_string()),
        plan: format!("plan for {description}"),
    }
}

#[tokio::test]
async fn save_assigns_distinct_ids() {
    let pool = memory_pool().await;

    let first = workflows::save(&pool, &new_workflow(Some("u1"), "one")).await.unwrap();
    let second = workflows::save(&pool, &new_workflow(Some("u1"), "two")).await.unwrap();

    assert_ne!(first, second);
    assert!(second > first);
}

#[tokio::test]
async fn saved_record_round_trips_all_fields() {
    let pool = memory_pool().await;

    let id = workflows::save(&pool, &new_workflow(Some("u1"), "invoice chasing"))
        .await
        .unwrap();

    let record = workflows::get(&pool, id).await.unwrap().expect("record exists");
    assert_eq!(record.id, id);
    assert_eq!(record.user_id.as_deref(), Some("u1"));
    assert_eq!(record.description, "invoice chasing");
    assert_eq!(record.segment.as_deref(), Some("agency"));
    assert_eq!(record.plan, "plan for invoice chasing");
}

#[tokio::test]
async fn get_unknown_id_returns_none() {
    let pool = memory_pool().await;
    assert!(workflows::get(&pool, 9999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_by_user_is_newest_first() {
    let pool = memory_pool().await;

    let mut ids = Vec::new();
    for description in ["first", "second", "third"] {
        ids.push(
            workflows::save(&pool, &new_workflow(Some("owner"), description))
                .await
                .unwrap(),
        );
    }

    let records = workflows::list_by_user(&pool, "owner").await.unwrap();
    let listed: Vec<i64> = records.iter().map(|r| r.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);

    for pair in records.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn list_by_user_only_returns_that_users_records() {
    let pool = memory_pool().await;

    workflows::save(&pool, &new_workflow(Some("alice"), "a")).await.unwrap();
    workflows::save(&pool, &new_workflow(Some("bob"), "b")).await.unwrap();
    workflows::save(&pool, &new_workflow(None, "anonymous")).await.unwrap();

    let alice = workflows::list_by_user(&pool, "alice").await.unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].description, "a");
}

#[tokio::test]
async fn list_by_unknown_user_is_empty() {
    let pool = memory_pool().await;
    let records = workflows::list_by_user(&pool, "nobody").await.unwrap();
    assert!(records.is_empty());
}
