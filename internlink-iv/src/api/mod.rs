//! HTTP API for internlink-iv

pub mod auth;
pub mod completion;
pub mod health;
pub mod sessions;
pub mod turns;

pub use auth::AuthUser;
pub use health::health_routes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Interview routes (all require a bearer token)
pub fn interview_routes() -> Router<AppState> {
    Router::new()
        .route("/api/interview/sessions", post(sessions::start_session))
        .route("/api/interview/sessions/:id", get(sessions::get_session))
        .route("/api/interview/sessions/:id/report", get(sessions::session_report))
        .route("/api/interview/respond", post(turns::respond))
        .route("/api/interview/complete", post(completion::complete_session))
}
