//! Turn submission endpoint (SSE)

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    Json,
};
use futures::Stream;
use internlink_common::sse::json_event_stream;
use tracing::debug;

use crate::api::AuthUser;
use crate::error::ApiError;
use crate::models::TurnRequest;
use crate::services::{TurnController, TurnError};
use crate::AppState;

/// POST /api/interview/respond
///
/// Always answers with an event stream; authentication and session errors
/// arrive as a terminal `error` frame.
pub async fn respond(
    State(state): State<AppState>,
    user: Result<AuthUser, ApiError>,
    Json(request): Json<TurnRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!(session_id = %request.session_id, "Turn submitted");

    let caller = user
        .map(|u| u.user_id)
        .map_err(|e| TurnError::Unauthenticated(e.to_string()));

    let controller = TurnController::new(state.db.clone(), state.completion.clone(), state.questions);

    json_event_stream("interview turn", controller.run(caller, request))
}
