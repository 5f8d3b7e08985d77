//! Shared HTTP API functionality
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Database operations (via sqlx)
//!
//! Each service wraps these with framework-specific extractors.

pub mod auth;

pub use auth::{bearer_token, create_user, hash_token, issue_token, resolve_token};
