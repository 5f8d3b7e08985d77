//! Database initialization
//!
//! Creates the database file on first run and the interview tables if they
//! are missing. All statements are idempotent, so every service may call
//! [`init_database`] at startup.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open (creating if needed) the on-disk database and ensure the schema
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_tables(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema
///
/// A single long-lived connection: every SQLite `:memory:` connection is its
/// own database, so the pool must never open a second one.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create all tables used by the interview service
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_auth_tokens_table(pool).await?;
    create_interns_table(pool).await?;
    create_interview_sessions_table(pool).await?;
    create_interview_responses_table(pool).await?;

    info!("Database tables initialized (users, auth_tokens, interns, interview_sessions, interview_responses)");

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_auth_tokens_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS auth_tokens (
            token_hash TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            expires_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_interns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interns (
            user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            full_name TEXT,
            email TEXT,
            phone TEXT,
            school TEXT,
            grade_level TEXT,
            city TEXT,
            skills TEXT,
            experience TEXT,
            bio TEXT,
            portfolio_url TEXT,
            linkedin_url TEXT,
            achievements TEXT,
            languages TEXT,
            skill_score INTEGER,
            experience_score INTEGER,
            personality_score INTEGER,
            overall_score INTEGER,
            ai_summary TEXT,
            ai_feedback TEXT,
            ai_tags TEXT,
            business_finance_score INTEGER,
            business_finance_recommendation TEXT,
            technology_engineering_score INTEGER,
            technology_engineering_recommendation TEXT,
            education_nonprofit_score INTEGER,
            education_nonprofit_recommendation TEXT,
            healthcare_sciences_score INTEGER,
            healthcare_sciences_recommendation TEXT,
            creative_media_score INTEGER,
            creative_media_recommendation TEXT,
            scored_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_interview_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'in_progress'
                CHECK (status IN ('in_progress', 'completed')),
            category TEXT NOT NULL,
            subcategory TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL,
            transcript TEXT NOT NULL DEFAULT '',
            duration_seconds INTEGER,
            completed_at TEXT,
            skill_score INTEGER,
            experience_score INTEGER,
            personality_score INTEGER,
            overall_score INTEGER,
            summary TEXT,
            feedback TEXT,
            tags TEXT,
            needs_feedback INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_interview_sessions_user ON interview_sessions(user_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_interview_responses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interview_responses (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL REFERENCES interview_sessions(id) ON DELETE CASCADE,
            question TEXT NOT NULL,
            category TEXT,
            answer TEXT NOT NULL,
            math_submission TEXT,
            asked_at TEXT,
            answered_at TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_interview_responses_session ON interview_responses(session_id, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
