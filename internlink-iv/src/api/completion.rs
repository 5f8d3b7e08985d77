//! Session completion endpoint

use axum::{extract::State, Json};

use crate::api::AuthUser;
use crate::error::ApiResult;
use crate::models::{CompleteSessionRequest, CompleteSessionResponse};
use crate::services::SessionCompleter;
use crate::AppState;

/// POST /api/interview/complete
pub async fn complete_session(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CompleteSessionRequest>,
) -> ApiResult<Json<CompleteSessionResponse>> {
    let completer = SessionCompleter::new(state.db.clone(), state.completion.clone());
    let response = completer.complete_session(&user.user_id, &request).await?;
    Ok(Json(response))
}
