//! End-of-session scoring types

use internlink_common::db::SessionStatus;
use serde::{Deserialize, Serialize};

/// One career-domain fit judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub score: i64,
    pub recommendation: String,
}

/// Fit scores for the five career domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainFit {
    pub business_finance: DomainScore,
    pub technology_engineering: DomainScore,
    pub education_nonprofit: DomainScore,
    pub healthcare_sciences: DomainScore,
    pub creative_media: DomainScore,
}

/// Validated scorer output; all numbers are within 0–100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub skill_score: i64,
    pub experience_score: i64,
    pub personality_score: i64,
    pub overall_score: i64,
    pub summary: String,
    pub feedback: String,
    pub tags: Vec<String>,
    pub domain_fit: DomainFit,
}

/// How the domain-fit scores should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringBasis {
    /// Profile is complete enough that the model blended it with the interview
    InterviewAndProfile,
    InterviewOnly,
}

/// POST /api/interview/complete request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompleteSessionRequest {
    #[serde(rename = "sessionId", alias = "session_id")]
    pub session_id: String,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    /// Client-side count, used only when the server has no turn data
    #[serde(default)]
    pub questions_answered: Option<u32>,
}

/// POST /api/interview/complete response
#[derive(Debug, Clone, Serialize)]
pub struct CompleteSessionResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub questions_answered: usize,
    pub overall_score: i64,
    /// Score derived from completion ratio only; report must be regenerated
    pub placeholder: bool,
    pub needs_feedback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_completeness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_basis: Option<ScoringBasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreResult>,
}
