//! Database models

use serde::{Deserialize, Serialize};

/// Interview session lifecycle state
///
/// Transitions only `InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

/// Row of `interview_sessions`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InterviewSession {
    pub id: String,
    pub user_id: String,
    pub status: SessionStatus,
    pub category: String,
    pub subcategory: String,
    pub difficulty: String,
    /// Append-only plain-text backup of every Q/A turn
    pub transcript: String,
    pub duration_seconds: Option<i64>,
    pub completed_at: Option<String>,
    pub skill_score: Option<i64>,
    pub experience_score: Option<i64>,
    pub personality_score: Option<i64>,
    pub overall_score: Option<i64>,
    pub summary: Option<String>,
    pub feedback: Option<String>,
    /// JSON array of short tags
    pub tags: Option<String>,
    pub needs_feedback: bool,
    pub created_at: String,
}

impl InterviewSession {
    /// Decoded tag list; unparseable or missing tags yield an empty list
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .and_then(|t| serde_json::from_str(t).ok())
            .unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

/// Row of `interview_responses` (one turn)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InterviewResponse {
    pub id: String,
    pub session_id: String,
    pub question: String,
    pub category: Option<String>,
    pub answer: String,
    /// Structured math work as JSON; absent on stores without the column
    #[sqlx(default)]
    pub math_submission: Option<String>,
    pub asked_at: Option<String>,
    pub answered_at: String,
    pub created_at: String,
}

/// Profile fields of `interns` that feed the scorer
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct InternProfile {
    pub user_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub grade_level: Option<String>,
    pub city: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub achievements: Option<String>,
    pub languages: Option<String>,
}
