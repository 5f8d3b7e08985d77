//! # InternLink Common Library
//!
//! Shared code for InternLink services including:
//! - Database initialization and row models
//! - Caller authentication (bearer tokens)
//! - Configuration loading and root folder resolution
//! - Server-Sent Events helpers
//! - Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod sse;
pub mod time;

pub use error::{Error, Result};
