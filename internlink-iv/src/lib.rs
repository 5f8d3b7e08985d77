//! internlink-iv library interface
//!
//! Mock-interview service: turn-taking over SSE, end-of-session scoring
//! and HTML reports. Exposed as a library for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::services::{CompletionClient, QuestionSource};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5740;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Completion API client; `None` when no API key is configured
    pub completion: Option<Arc<dyn CompletionClient>>,
    pub questions: QuestionSource,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, completion: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            db,
            completion,
            questions: QuestionSource::default(),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::interview_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
