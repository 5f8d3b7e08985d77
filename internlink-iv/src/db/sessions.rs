//! Interview session database operations

use internlink_common::db::{InterviewSession, SessionStatus};
use internlink_common::{time, Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::ScoreResult;

/// Insert a new in-progress session and return its identifier
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    category: &str,
    subcategory: &str,
    difficulty: &str,
) -> Result<String> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO interview_sessions (id, user_id, status, category, subcategory, difficulty, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(SessionStatus::InProgress)
    .bind(category)
    .bind(subcategory)
    .bind(difficulty)
    .bind(time::now_storage())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Load a session by id
pub async fn load_session(pool: &SqlitePool, session_id: &str) -> Result<Option<InterviewSession>> {
    let session = sqlx::query_as::<_, InterviewSession>(
        r#"
        SELECT id, user_id, status, category, subcategory, difficulty, transcript,
               duration_seconds, completed_at, skill_score, experience_score,
               personality_score, overall_score, summary, feedback, tags,
               needs_feedback, created_at
        FROM interview_sessions
        WHERE id = ?
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Load a session and check it belongs to `user_id`
///
/// Missing sessions yield [`Error::NotFound`]; sessions owned by someone
/// else yield [`Error::Unauthorized`].
pub async fn load_owned_session(
    pool: &SqlitePool,
    session_id: &str,
    user_id: &str,
) -> Result<InterviewSession> {
    let session = load_session(pool, session_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Interview session {}", session_id)))?;

    if session.user_id != user_id {
        return Err(Error::Unauthorized(format!(
            "Interview session {} belongs to another user",
            session_id
        )));
    }

    Ok(session)
}

/// Append text to the session transcript
///
/// Done in SQL so concurrent appends never overwrite each other.
pub async fn append_transcript(pool: &SqlitePool, session_id: &str, entry: &str) -> Result<()> {
    let result = sqlx::query(
        "UPDATE interview_sessions SET transcript = COALESCE(transcript, '') || ? WHERE id = ?",
    )
    .bind(entry)
    .bind(session_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Interview session {}", session_id)));
    }

    Ok(())
}

/// Mark the session completed with model-produced scores
pub async fn store_scores(
    pool: &SqlitePool,
    session_id: &str,
    scores: &ScoreResult,
    duration_seconds: Option<i64>,
) -> Result<()> {
    let tags = serde_json::to_string(&scores.tags)
        .map_err(|e| Error::Internal(format!("Failed to serialize tags: {}", e)))?;

    sqlx::query(
        r#"
        UPDATE interview_sessions SET
            status = ?,
            completed_at = ?,
            duration_seconds = ?,
            skill_score = ?,
            experience_score = ?,
            personality_score = ?,
            overall_score = ?,
            summary = ?,
            feedback = ?,
            tags = ?,
            needs_feedback = 0
        WHERE id = ?
        "#,
    )
    .bind(SessionStatus::Completed)
    .bind(time::now_storage())
    .bind(duration_seconds)
    .bind(scores.skill_score)
    .bind(scores.experience_score)
    .bind(scores.personality_score)
    .bind(scores.overall_score)
    .bind(&scores.summary)
    .bind(&scores.feedback)
    .bind(tags)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark the session completed with a placeholder score awaiting regeneration
pub async fn store_placeholder(
    pool: &SqlitePool,
    session_id: &str,
    overall_score: i64,
    duration_seconds: Option<i64>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE interview_sessions SET
            status = ?,
            completed_at = ?,
            duration_seconds = ?,
            overall_score = ?,
            needs_feedback = 1
        WHERE id = ?
        "#,
    )
    .bind(SessionStatus::Completed)
    .bind(time::now_storage())
    .bind(duration_seconds)
    .bind(overall_score)
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}
