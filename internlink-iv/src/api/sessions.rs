//! Interview session endpoints

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use internlink_common::db::{InterviewResponse, InterviewSession, SessionStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::AuthUser;
use crate::db::{responses, sessions};
use crate::error::{ApiError, ApiResult};
use crate::models::TurnProgress;
use crate::services::render_report;
use crate::utils::count_question_markers;
use crate::AppState;

/// POST /api/interview/sessions request
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub interview_category: String,
    #[serde(default)]
    pub interview_subcategory: String,
    pub difficulty_level: String,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub first_question: String,
    pub progress: TurnProgress,
}

#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session: InterviewSession,
    pub tags: Vec<String>,
    pub responses: Vec<InterviewResponse>,
    pub progress: TurnProgress,
}

/// POST /api/interview/sessions
pub async fn start_session(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<StartSessionRequest>,
) -> ApiResult<Json<StartSessionResponse>> {
    let category = request.interview_category.trim();
    let difficulty = request.difficulty_level.trim();
    if category.is_empty() || difficulty.is_empty() {
        return Err(ApiError::BadRequest(
            "interview_category and difficulty_level are required".to_string(),
        ));
    }
    let subcategory = request.interview_subcategory.trim();

    let session_id =
        sessions::create_session(&state.db, &user.user_id, category, subcategory, difficulty).await?;
    let first_question = state
        .questions
        .opening_question(category, subcategory, difficulty);

    info!(
        session_id = %session_id,
        user_id = %user.user_id,
        category,
        difficulty,
        "Interview session started"
    );

    Ok(Json(StartSessionResponse {
        session_id,
        status: SessionStatus::InProgress,
        first_question: first_question.to_string(),
        progress: TurnProgress::new(0),
    }))
}

/// GET /api/interview/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionDetail>> {
    let session = sessions::load_owned_session(&state.db, &session_id, &user.user_id).await?;
    let rows = responses::list_for_session(&state.db, &session.id).await?;
    let answered = rows.len().max(count_question_markers(&session.transcript));

    Ok(Json(SessionDetail {
        tags: session.tag_list(),
        session,
        responses: rows,
        progress: TurnProgress::new(answered),
    }))
}

/// GET /api/interview/sessions/:id/report
pub async fn session_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<Html<String>> {
    let session = sessions::load_owned_session(&state.db, &session_id, &user.user_id).await?;
    let rows = responses::list_for_session(&state.db, &session.id).await?;

    Ok(Html(render_report(&session, &rows)))
}
