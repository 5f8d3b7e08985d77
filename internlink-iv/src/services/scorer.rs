//! End-of-session scoring
//!
//! The transcript and the intern's profile go to the completion API in one
//! prompt; the reply is shape-checked and written back to both the session
//! and the intern row. Scores themselves are the model's judgment. This
//! module validates structure and ranges only.

use std::sync::Arc;

use internlink_common::db::{InternProfile, InterviewSession};
use internlink_common::time;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::db::{profiles, responses, sessions};
use crate::models::{
    CompleteSessionRequest, CompleteSessionResponse, DomainFit, DomainScore, ScoreResult,
    ScoringBasis, MAX_TURNS,
};
use crate::services::completion_client::{ChatMessage, CompletionClient, CompletionError};
use crate::utils::model_output::{extract_json_object, string_field};
use crate::utils::{count_question_markers, format_turn};

/// Profile completeness (percent) at which domain fit blends profile and interview
pub const PROFILE_BLEND_THRESHOLD: f64 = 80.0;

const REQUIRED_WEIGHT: f64 = 70.0;
const OPTIONAL_WEIGHT: f64 = 30.0;
const SCORE_MAX_TOKENS: u32 = 1500;

/// Scoring and completion failures
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("No interview responses recorded for this session")]
    NoData,

    #[error("Interview scoring is not configured")]
    NotConfigured,

    #[error("Scoring request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Malformed scoring response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Common(#[from] internlink_common::Error),
}

/// Weighted share (0–100) of filled-in profile fields
///
/// Nine required fields carry 70 points, four optional fields 30. Blank
/// values, `[]` and `Not provided` count as absent.
pub fn profile_completeness(profile: &InternProfile) -> f64 {
    let required = [
        &profile.full_name,
        &profile.email,
        &profile.phone,
        &profile.school,
        &profile.grade_level,
        &profile.city,
        &profile.skills,
        &profile.experience,
        &profile.bio,
    ];
    let optional = [
        &profile.portfolio_url,
        &profile.linkedin_url,
        &profile.achievements,
        &profile.languages,
    ];

    let present = |fields: &[&Option<String>]| {
        fields.iter().filter(|f| is_present(f.as_deref())).count() as f64
    };

    REQUIRED_WEIGHT * present(&required[..]) / required.len() as f64
        + OPTIONAL_WEIGHT * present(&optional[..]) / optional.len() as f64
}

fn is_present(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("[]") => false,
        Some(v) => !v.eq_ignore_ascii_case("not provided"),
    }
}

pub fn scoring_basis(completeness: f64) -> ScoringBasis {
    if completeness >= PROFILE_BLEND_THRESHOLD {
        ScoringBasis::InterviewAndProfile
    } else {
        ScoringBasis::InterviewOnly
    }
}

/// Score stored when only the client-side answer count is known
///
/// Linear in the completion ratio: 0 answers give 50, 12 give 70.
pub fn placeholder_score(answered: u32) -> i64 {
    let ratio = (answered as f64).min(MAX_TURNS as f64) / MAX_TURNS as f64;
    (50.0 + 20.0 * ratio).round() as i64
}

/// Model-backed scorer
pub struct Scorer {
    client: Arc<dyn CompletionClient>,
}

impl Scorer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Score one interview
    pub async fn score(
        &self,
        transcript: &str,
        profile: Option<&InternProfile>,
        completeness: f64,
    ) -> Result<ScoreResult, ScoreError> {
        let basis = scoring_basis(completeness);
        let prompt = scoring_prompt(transcript, profile, completeness, basis);

        let raw = self
            .client
            .complete_json(SCORER_SYSTEM_PROMPT, &[ChatMessage::user(prompt)], SCORE_MAX_TOKENS)
            .await?;

        parse_score_response(&raw)
    }
}

const SCORER_SYSTEM_PROMPT: &str = "You evaluate practice internship interviews of high-school students. \
Be fair and encouraging, base every judgment on evidence in the transcript and profile, and answer with a single JSON object only.";

fn scoring_prompt(
    transcript: &str,
    profile: Option<&InternProfile>,
    completeness: f64,
    basis: ScoringBasis,
) -> String {
    let mut prompt = String::from("Interview transcript:\n");
    prompt.push_str(transcript.trim());
    prompt.push_str("\n\nIntern profile:\n");

    match profile {
        Some(p) => {
            let fields = [
                ("Name", &p.full_name),
                ("School", &p.school),
                ("Grade level", &p.grade_level),
                ("City", &p.city),
                ("Skills", &p.skills),
                ("Experience", &p.experience),
                ("Bio", &p.bio),
                ("Achievements", &p.achievements),
                ("Languages", &p.languages),
                ("Portfolio", &p.portfolio_url),
            ];
            for (label, value) in fields {
                let value = value.as_deref().filter(|v| is_present(Some(*v)));
                prompt.push_str(&format!("{}: {}\n", label, value.unwrap_or("Not provided")));
            }
        }
        None => prompt.push_str("No profile on file.\n"),
    }

    prompt.push_str(&format!("\nProfile completeness: {:.0}%\n", completeness));

    match basis {
        ScoringBasis::InterviewAndProfile => prompt.push_str(
            "The profile is substantially complete: base the domain fit scores on both the interview and the profile.\n",
        ),
        ScoringBasis::InterviewOnly => prompt.push_str(
            "The profile is incomplete: base the domain fit scores on the interview answers only.\n",
        ),
    }

    prompt.push_str(
        "\nReturn JSON with exactly these keys:\n\
         {\"skill_score\": 0-100, \"experience_score\": 0-100, \"personality_score\": 0-100, \
         \"overall_score\": 0-100, \"summary\": \"2-3 sentences\", \"feedback\": \"specific advice\", \
         \"tags\": [\"up to 5 short tags\"], \"domain_fit\": {\
         \"business_finance\": {\"score\": 0-100, \"recommendation\": \"...\"}, \
         \"technology_engineering\": {...}, \"education_nonprofit\": {...}, \
         \"healthcare_sciences\": {...}, \"creative_media\": {...}}}",
    );

    prompt
}

/// Validate a scoring reply
///
/// All keys are required; numbers (or numeric strings) are rounded and
/// clamped to 0–100.
pub fn parse_score_response(raw: &str) -> Result<ScoreResult, ScoreError> {
    let obj = extract_json_object(raw)
        .ok_or_else(|| ScoreError::MalformedResponse("reply is not a JSON object".to_string()))?;

    let domain = obj
        .get("domain_fit")
        .and_then(Value::as_object)
        .ok_or_else(|| missing("domain_fit"))?;

    Ok(ScoreResult {
        skill_score: score_field(&obj, "skill_score")?,
        experience_score: score_field(&obj, "experience_score")?,
        personality_score: score_field(&obj, "personality_score")?,
        overall_score: score_field(&obj, "overall_score")?,
        summary: string_field(&obj, "summary").ok_or_else(|| missing("summary"))?,
        feedback: string_field(&obj, "feedback").ok_or_else(|| missing("feedback"))?,
        tags: tags_field(&obj)?,
        domain_fit: DomainFit {
            business_finance: domain_score(domain, "business_finance")?,
            technology_engineering: domain_score(domain, "technology_engineering")?,
            education_nonprofit: domain_score(domain, "education_nonprofit")?,
            healthcare_sciences: domain_score(domain, "healthcare_sciences")?,
            creative_media: domain_score(domain, "creative_media")?,
        },
    })
}

fn missing(key: &str) -> ScoreError {
    ScoreError::MalformedResponse(format!("missing or invalid '{}'", key))
}

fn score_field(obj: &Map<String, Value>, key: &str) -> Result<i64, ScoreError> {
    let value = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as i64)
        .ok_or_else(|| missing(key))
}

fn tags_field(obj: &Map<String, Value>) -> Result<Vec<String>, ScoreError> {
    match obj.get("tags") {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()),
        _ => Err(missing("tags")),
    }
}

fn domain_score(domain: &Map<String, Value>, key: &str) -> Result<DomainScore, ScoreError> {
    let entry = domain
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| missing(key))?;

    Ok(DomainScore {
        score: score_field(entry, "score").map_err(|_| missing(&format!("{}.score", key)))?,
        recommendation: string_field(entry, "recommendation")
            .ok_or_else(|| missing(&format!("{}.recommendation", key)))?,
    })
}

/// Finishes interview sessions: gathers the record, scores it and stores
/// the result
pub struct SessionCompleter {
    db: SqlitePool,
    completion: Option<Arc<dyn CompletionClient>>,
}

impl SessionCompleter {
    pub fn new(db: SqlitePool, completion: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { db, completion }
    }

    /// Complete a session owned by `user_id`
    ///
    /// Evidence is taken from response rows, then the transcript. With
    /// neither, a client-supplied answer count yields a placeholder score
    /// flagged for regeneration; with nothing at all the request is rejected.
    pub async fn complete_session(
        &self,
        user_id: &str,
        request: &CompleteSessionRequest,
    ) -> Result<CompleteSessionResponse, ScoreError> {
        let session = sessions::load_owned_session(&self.db, &request.session_id, user_id).await?;
        let rows = responses::list_for_session(&self.db, &session.id).await?;

        let transcript_turns = count_question_markers(&session.transcript);
        let questions_answered = rows.len().max(transcript_turns);
        let duration_seconds = request
            .duration_seconds
            .or_else(|| elapsed_seconds(&session));

        if questions_answered == 0 {
            return match request.questions_answered.filter(|n| *n > 0) {
                Some(client_count) => self.complete_with_placeholder(&session, client_count, duration_seconds).await,
                None => Err(ScoreError::NoData),
            };
        }

        let client = self.completion.clone().ok_or(ScoreError::NotConfigured)?;

        let transcript = if rows.is_empty() {
            session.transcript.clone()
        } else {
            rows.iter()
                .enumerate()
                .map(|(i, r)| format_turn(i + 1, &r.question, &r.answer))
                .collect()
        };

        let profile = match profiles::load_profile(&self.db, &session.user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id = %session.user_id, "Failed to load intern profile: {}", e);
                None
            }
        };
        let completeness = profile.as_ref().map(profile_completeness).unwrap_or(0.0);
        let basis = scoring_basis(completeness);

        let scores = Scorer::new(client)
            .score(&transcript, profile.as_ref(), completeness)
            .await?;

        self.store_scores(&session, &scores, duration_seconds).await;

        info!(
            session_id = %session.id,
            questions_answered,
            overall_score = scores.overall_score,
            completeness,
            "Interview session scored"
        );

        Ok(CompleteSessionResponse {
            session_id: session.id,
            status: internlink_common::db::SessionStatus::Completed,
            questions_answered,
            overall_score: scores.overall_score,
            placeholder: false,
            needs_feedback: false,
            profile_completeness: Some((completeness * 10.0).round() / 10.0),
            scoring_basis: Some(basis),
            scores: Some(scores),
        })
    }

    async fn complete_with_placeholder(
        &self,
        session: &InterviewSession,
        client_count: u32,
        duration_seconds: Option<i64>,
    ) -> Result<CompleteSessionResponse, ScoreError> {
        let overall_score = placeholder_score(client_count);
        sessions::store_placeholder(&self.db, &session.id, overall_score, duration_seconds).await?;

        warn!(
            session_id = %session.id,
            client_count,
            overall_score,
            "No server-side turns found; stored placeholder score"
        );

        Ok(CompleteSessionResponse {
            session_id: session.id.clone(),
            status: internlink_common::db::SessionStatus::Completed,
            questions_answered: client_count.min(MAX_TURNS as u32) as usize,
            overall_score,
            placeholder: true,
            needs_feedback: true,
            profile_completeness: None,
            scoring_basis: None,
            scores: None,
        })
    }

    /// Write scores to the intern and session rows independently
    async fn store_scores(
        &self,
        session: &InterviewSession,
        scores: &ScoreResult,
        duration_seconds: Option<i64>,
    ) {
        match profiles::store_scores(&self.db, &session.user_id, scores).await {
            Ok(0) => warn!(user_id = %session.user_id, "No intern profile to store scores on"),
            Ok(_) => {}
            Err(e) => error!(user_id = %session.user_id, "Failed to store intern scores: {}", e),
        }

        if let Err(e) = sessions::store_scores(&self.db, &session.id, scores, duration_seconds).await {
            error!(session_id = %session.id, "Failed to store session scores: {}", e);
        }
    }
}

fn elapsed_seconds(session: &InterviewSession) -> Option<i64> {
    let started = time::parse_storage(&session.created_at).ok()?;
    Some((time::now() - started).num_seconds().max(0))
}
