//! Bearer-token caller identity
//!
//! Every interview route resolves the caller from `Authorization: Bearer
//! <token>` before touching a session. Handlers that must report auth
//! failures in-band (the turn stream) take `Result<AuthUser, ApiError>`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use internlink_common::api::{bearer_token, resolve_token};
use tracing::debug;

use crate::{error::ApiError, AppState};

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".to_string()))?;

        let user_id = resolve_token(&state.db, token).await?;
        debug!(user_id = %user_id, "Caller authenticated");

        Ok(AuthUser { user_id })
    }
}
