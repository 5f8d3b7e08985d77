//! Interview response (turn) database operations

use internlink_common::db::InterviewResponse;
use internlink_common::{time, Error, Result};
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

/// A turn to be stored
#[derive(Debug, Clone)]
pub struct NewResponse<'a> {
    pub session_id: &'a str,
    pub question: &'a str,
    pub category: &'a str,
    pub answer: &'a str,
    /// JSON-encoded math steps
    pub math_submission: Option<String>,
}

/// Insert one response row
///
/// With `include_math` false the `math_submission` column is left out of the
/// statement, for stores whose schema predates it.
pub async fn insert_response(
    pool: &SqlitePool,
    response: &NewResponse<'_>,
    include_math: bool,
) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = time::now_storage();

    let query = if include_math {
        sqlx::query(
            r#"
            INSERT INTO interview_responses
                (id, session_id, question, category, answer, math_submission, asked_at, answered_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(response.session_id)
        .bind(response.question)
        .bind(response.category)
        .bind(response.answer)
        .bind(response.math_submission.as_deref())
    } else {
        sqlx::query(
            r#"
            INSERT INTO interview_responses
                (id, session_id, question, category, answer, asked_at, answered_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(response.session_id)
        .bind(response.question)
        .bind(response.category)
        .bind(response.answer)
    };

    query
        .bind(&now)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

    Ok(id)
}

/// Insert a response, retrying without `math_submission` if the first
/// attempt fails
pub async fn insert_response_with_fallback(
    pool: &SqlitePool,
    response: &NewResponse<'_>,
) -> Result<String> {
    match insert_response(pool, response, true).await {
        Ok(id) => Ok(id),
        Err(e) => {
            warn!(
                session_id = %response.session_id,
                unknown_column = e.is_unknown_column(),
                "Response insert failed, retrying without math_submission: {}",
                e
            );
            insert_response(pool, response, false).await
        }
    }
}

/// All responses of a session in submission order
pub async fn list_for_session(pool: &SqlitePool, session_id: &str) -> Result<Vec<InterviewResponse>> {
    match list_rows(pool, session_id, true).await {
        Err(e) if e.is_unknown_column() => list_rows(pool, session_id, false).await,
        other => other,
    }
}

/// Number of responses stored for a session
pub async fn count_for_session(pool: &SqlitePool, session_id: &str) -> Result<usize> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM interview_responses WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(pool)
            .await?;

    usize::try_from(count).map_err(|e| Error::Internal(format!("Invalid response count: {}", e)))
}

async fn list_rows(
    pool: &SqlitePool,
    session_id: &str,
    include_math: bool,
) -> Result<Vec<InterviewResponse>> {
    let columns = if include_math {
        "id, session_id, question, category, answer, math_submission, asked_at, answered_at, created_at"
    } else {
        "id, session_id, question, category, answer, asked_at, answered_at, created_at"
    };

    let sql = format!(
        "SELECT {} FROM interview_responses WHERE session_id = ? ORDER BY created_at, rowid",
        columns
    );

    let rows = sqlx::query_as::<_, InterviewResponse>(&sql)
        .bind(session_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
