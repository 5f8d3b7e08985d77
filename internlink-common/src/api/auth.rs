//! Caller authentication via bearer tokens
//!
//! Tokens are opaque random strings handed to clients once. Only their
//! SHA-256 digest is stored, in `auth_tokens.token_hash`, so a database dump
//! does not leak usable credentials.

use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{time, Error, Result};

/// SHA-256 of the token as 64 lowercase hex characters
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extract the token from an `Authorization` header value
///
/// Accepts `Bearer <token>` with any scheme casing; returns `None` for other
/// schemes or an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Create a user row and return its identifier
pub async fn create_user(db: &SqlitePool, email: &str) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind(time::now_storage())
        .execute(db)
        .await?;
    Ok(id)
}

/// Issue a new token for `user_id`; the plain token is returned exactly once
pub async fn issue_token(db: &SqlitePool, user_id: &str) -> Result<String> {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    sqlx::query("INSERT INTO auth_tokens (token_hash, user_id, created_at) VALUES (?, ?, ?)")
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(time::now_storage())
        .execute(db)
        .await?;

    Ok(token)
}

/// Resolve a presented token to its user identifier
///
/// Unknown and expired tokens both yield [`Error::Unauthorized`].
pub async fn resolve_token(db: &SqlitePool, token: &str) -> Result<String> {
    let row: Option<(String, Option<String>)> =
        sqlx::query_as("SELECT user_id, expires_at FROM auth_tokens WHERE token_hash = ?")
            .bind(hash_token(token))
            .fetch_optional(db)
            .await?;

    let (user_id, expires_at) =
        row.ok_or_else(|| Error::Unauthorized("Unknown access token".to_string()))?;

    if let Some(expires_at) = expires_at {
        if time::parse_storage(&expires_at)? <= time::now() {
            return Err(Error::Unauthorized("Access token expired".to_string()));
        }
    }

    Ok(user_id)
}
