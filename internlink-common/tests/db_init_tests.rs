//! Database initialization

use internlink_common::db::{init_database, init_memory_database};

async fn table_names(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sub").join("internlink.db");

    let pool = init_database(&db_path).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("internlink.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let pool = init_memory_database().await.unwrap();
    let tables = table_names(&pool).await;

    for expected in [
        "auth_tokens",
        "interns",
        "interview_responses",
        "interview_sessions",
        "users",
    ] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_session_status_constraint() {
    let pool = init_memory_database().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO interview_sessions (id, user_id, status, category, difficulty, created_at)
         VALUES ('s1', 'u1', 'paused', 'technology', 'beginner', '2026-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "status outside in_progress|completed must be rejected");
}

#[tokio::test]
async fn test_responses_cascade_with_session() {
    let pool = init_memory_database().await.unwrap();

    sqlx::query(
        "INSERT INTO interview_sessions (id, user_id, category, difficulty, created_at)
         VALUES ('s1', 'u1', 'technology', 'beginner', '2026-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO interview_responses (id, session_id, question, answer, answered_at, created_at)
         VALUES ('r1', 's1', 'Q', 'A', '2026-01-01T00:00:01Z', '2026-01-01T00:00:01Z')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("DELETE FROM interview_sessions WHERE id = 's1'")
        .execute(&pool)
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interview_responses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
