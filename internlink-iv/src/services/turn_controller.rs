//! Interview turn controller
//!
//! One call to [`TurnController::run`] handles one submitted answer and
//! yields the frames streamed back to the learner:
//!
//! ```text
//! start -> [progress] -> done | complete | error
//! ```
//!
//! The session moves from collecting answers to complete once 12 answers are
//! recorded; the count only grows, so a finished session stays finished. Turn
//! counting takes the larger of the stored response rows and the transcript
//! `Q<n>:` markers, because either record may be missing turns the other has.

use std::sync::Arc;

use futures::Stream;
use internlink_common::db::{InterviewResponse, InterviewSession};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::db::{responses, sessions};
use crate::models::{TurnEvent, TurnProgress, TurnRequest, MAX_TURNS};
use crate::services::completion_client::{ChatMessage, CompletionClient, CompletionError};
use crate::services::question_source::{QuestionSource, PHASES};
use crate::utils::model_output::{extract_json_object, string_field};
use crate::utils::{count_question_markers, format_turn, parse_turns, to_linear_notation};

/// Most recent turns sent to the model as conversation context
pub const CONTEXT_WINDOW_TURNS: usize = 6;

/// Acknowledgment used when the model reply carries none
pub const FALLBACK_ACKNOWLEDGMENT: &str = "Thanks for sharing that.";

const TURN_MAX_TOKENS: u32 = 300;

/// Reasons a turn ends with an `error` frame
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Interview session not found")]
    SessionNotFound,

    #[error("Not authorized to answer in this interview session")]
    NotOwner,

    #[error("Interview assistant is not configured")]
    NotConfigured,

    #[error("Interview assistant request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Database error: {0}")]
    Database(internlink_common::Error),
}

impl From<internlink_common::Error> for TurnError {
    fn from(err: internlink_common::Error) -> Self {
        match err {
            internlink_common::Error::NotFound(_) => TurnError::SessionNotFound,
            internlink_common::Error::Unauthorized(_) => TurnError::NotOwner,
            other => TurnError::Database(other),
        }
    }
}

/// Acknowledgment and follow-up question extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub acknowledgment: String,
    pub next_question: String,
}

/// A turn that passed validation and awaits the model
struct PendingTurn {
    session: InterviewSession,
    client: Arc<dyn CompletionClient>,
    /// Answers recorded before this one
    prior_turns: usize,
    window: Vec<(String, String)>,
    candidate: Option<&'static str>,
}

enum Admission {
    Pending(Box<PendingTurn>),
    /// Session already holds all answers; nothing is recorded
    Finished(TurnProgress),
}

/// Processes interview turns
#[derive(Clone)]
pub struct TurnController {
    db: SqlitePool,
    completion: Option<Arc<dyn CompletionClient>>,
    questions: QuestionSource,
}

impl TurnController {
    pub fn new(
        db: SqlitePool,
        completion: Option<Arc<dyn CompletionClient>>,
        questions: QuestionSource,
    ) -> Self {
        Self {
            db,
            completion,
            questions,
        }
    }

    /// Process one submitted answer as a stream of frames
    ///
    /// `caller` is the authenticated user id, or the reason authentication
    /// failed. The stream always ends with exactly one terminal frame.
    pub fn run(
        self,
        caller: Result<String, TurnError>,
        request: TurnRequest,
    ) -> impl Stream<Item = TurnEvent> + Send + 'static {
        async_stream::stream! {
            yield TurnEvent::Start;

            let pending = match self.admit(caller, &request).await {
                Ok(Admission::Pending(pending)) => pending,
                Ok(Admission::Finished(progress)) => {
                    info!(session_id = %request.session_id, "Turn submitted after interview finished");
                    yield TurnEvent::Complete { acknowledgment: None, progress };
                    return;
                }
                Err(e) => {
                    warn!(session_id = %request.session_id, "Turn rejected: {}", e);
                    yield TurnEvent::Error { error: e.to_string() };
                    return;
                }
            };

            yield TurnEvent::Progress {
                progress: TurnProgress::new(pending.prior_turns + 1),
            };

            match self.answer(*pending, &request).await {
                Ok(event) => yield event,
                Err(e) => {
                    error!(session_id = %request.session_id, "Turn failed: {}", e);
                    yield TurnEvent::Error { error: e.to_string() };
                }
            }
        }
    }

    /// Validate caller, session and configuration; gather context
    async fn admit(
        &self,
        caller: Result<String, TurnError>,
        request: &TurnRequest,
    ) -> Result<Admission, TurnError> {
        let user_id = caller?;
        let session = sessions::load_owned_session(&self.db, &request.session_id, &user_id).await?;

        let client = self.completion.clone().ok_or(TurnError::NotConfigured)?;

        let rows = responses::list_for_session(&self.db, &session.id).await?;
        let prior_turns = rows.len().max(count_question_markers(&session.transcript));

        if prior_turns >= MAX_TURNS || session.is_completed() {
            return Ok(Admission::Finished(TurnProgress::new(prior_turns)));
        }

        let history = conversation_history(&rows, &session.transcript);
        let window_start = history.len().saturating_sub(CONTEXT_WINDOW_TURNS);
        let window = history[window_start..].to_vec();

        let mut asked: Vec<&str> = history.iter().map(|(q, _)| q.as_str()).collect();
        asked.push(&request.current_question);

        let (category, subcategory, difficulty) = selection_key(request, &session);
        let candidate = self
            .questions
            .pick_unused(category, subcategory, difficulty, &asked);

        debug!(
            session_id = %session.id,
            prior_turns,
            window = window.len(),
            has_candidate = candidate.is_some(),
            "Turn admitted"
        );

        Ok(Admission::Pending(Box::new(PendingTurn {
            session,
            client,
            prior_turns,
            window,
            candidate,
        })))
    }

    /// Ask the model, record the turn and build the terminal frame
    async fn answer(&self, pending: PendingTurn, request: &TurnRequest) -> Result<TurnEvent, TurnError> {
        let PendingTurn {
            session,
            client,
            prior_turns,
            window,
            candidate,
        } = pending;

        let answered = prior_turns + 1;
        let answer = answer_text(request);
        let (category, subcategory, difficulty) = selection_key(request, &session);

        let system = system_prompt(category, subcategory, difficulty);
        let messages = build_messages(&window, request, &answer, candidate, prior_turns);

        let raw = client
            .complete_json(&system, &messages, TURN_MAX_TOKENS)
            .await?;

        let phase_fallback = self.questions.phase_question(answered);
        let reply = parse_model_reply(&raw, candidate.unwrap_or(phase_fallback));

        self.record_turn(&session, request, &answer, answered).await;

        let progress = TurnProgress::new(answered);
        info!(
            session_id = %session.id,
            answered,
            model = client.model(),
            "Interview turn recorded"
        );

        if answered >= MAX_TURNS {
            Ok(TurnEvent::Complete {
                acknowledgment: Some(reply.acknowledgment),
                progress,
            })
        } else {
            Ok(TurnEvent::Done {
                acknowledgment: reply.acknowledgment,
                next_question: reply.next_question,
                progress,
            })
        }
    }

    /// Store the response row and transcript entry; failures are logged only
    async fn record_turn(
        &self,
        session: &InterviewSession,
        request: &TurnRequest,
        answer: &str,
        turn_number: usize,
    ) {
        let math_submission = request
            .steps()
            .and_then(|steps| serde_json::to_string(steps).ok());

        let new_response = responses::NewResponse {
            session_id: &session.id,
            question: &request.current_question,
            category: &session.category,
            answer,
            math_submission,
        };

        let row_stored = match responses::insert_response_with_fallback(&self.db, &new_response).await {
            Ok(_) => true,
            Err(e) => {
                error!(session_id = %session.id, "Failed to store interview response: {}", e);
                false
            }
        };

        let entry = format_turn(turn_number, &request.current_question, answer);
        match sessions::append_transcript(&self.db, &session.id, &entry).await {
            Ok(()) if !row_stored => {
                warn!(session_id = %session.id, turn_number, "Turn recorded in transcript only");
            }
            Ok(()) => {}
            Err(e) => {
                error!(session_id = %session.id, "Failed to append transcript: {}", e);
            }
        }
    }
}

/// Interpret a model reply
///
/// A JSON object supplies `acknowledgment` and `next_question`; a plain-text
/// reply is read as acknowledgment on the first line and question on the
/// second. Whatever is missing is filled with a stock acknowledgment and
/// `fallback_question`.
pub fn parse_model_reply(raw: &str, fallback_question: &str) -> ModelReply {
    if let Some(obj) = extract_json_object(raw) {
        let acknowledgment = string_field(&obj, "acknowledgment")
            .or_else(|| string_field(&obj, "acknowledgement"));
        let next_question = string_field(&obj, "next_question");

        return ModelReply {
            acknowledgment: acknowledgment.unwrap_or_else(|| FALLBACK_ACKNOWLEDGMENT.to_string()),
            next_question: next_question.unwrap_or_else(|| fallback_question.to_string()),
        };
    }

    let lines: Vec<String> = raw
        .lines()
        .map(strip_label)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    match lines.as_slice() {
        [ack, question, ..] => ModelReply {
            acknowledgment: ack.clone(),
            next_question: question.clone(),
        },
        [only] if only.ends_with('?') => ModelReply {
            acknowledgment: FALLBACK_ACKNOWLEDGMENT.to_string(),
            next_question: only.clone(),
        },
        [only] => ModelReply {
            acknowledgment: only.clone(),
            next_question: fallback_question.to_string(),
        },
        [] => ModelReply {
            acknowledgment: FALLBACK_ACKNOWLEDGMENT.to_string(),
            next_question: fallback_question.to_string(),
        },
    }
}

fn strip_label(line: &str) -> &str {
    const LABELS: [&str; 5] = [
        "acknowledgment:",
        "acknowledgement:",
        "next question:",
        "next_question:",
        "question:",
    ];

    let line = line.trim();
    for label in LABELS {
        if let Some(head) = line.get(..label.len()) {
            if head.eq_ignore_ascii_case(label) {
                return line[label.len()..].trim();
            }
        }
    }
    line
}

/// Prior Q/A pairs, from response rows or, if there are none, the transcript
fn conversation_history(rows: &[InterviewResponse], transcript: &str) -> Vec<(String, String)> {
    if rows.is_empty() {
        parse_turns(transcript)
            .into_iter()
            .map(|t| (t.question, t.answer))
            .collect()
    } else {
        rows.iter()
            .map(|r| (r.question.clone(), r.answer.clone()))
            .collect()
    }
}

/// Request labels, falling back to those the session was started with
fn selection_key<'a>(request: &'a TurnRequest, session: &'a InterviewSession) -> (&'a str, &'a str, &'a str) {
    fn pick<'a>(primary: &'a str, fallback: &'a str) -> &'a str {
        if primary.trim().is_empty() {
            fallback
        } else {
            primary
        }
    }

    (
        pick(&request.interview_category, &session.category),
        pick(&request.interview_subcategory, &session.subcategory),
        pick(&request.difficulty_level, &session.difficulty),
    )
}

/// Answer as recorded: free text plus any math work in linear notation
fn answer_text(request: &TurnRequest) -> String {
    let text = request.user_response.trim();
    match request.steps() {
        Some(steps) if text.is_empty() => to_linear_notation(steps),
        Some(steps) => format!("{}\n{}", text, to_linear_notation(steps)),
        None => text.to_string(),
    }
}

fn system_prompt(category: &str, subcategory: &str, difficulty: &str) -> String {
    let focus = if subcategory.trim().is_empty() {
        category.to_string()
    } else {
        format!("{} ({})", category, subcategory)
    };

    format!(
        "You are a friendly interviewer running a practice internship interview for a high-school student.\n\
         Field: {focus}. Difficulty: {difficulty}.\n\
         After each answer, acknowledge it in one encouraging sentence, then ask exactly one next question.\n\
         Do not repeat questions already asked. Keep questions appropriate for a high-school student.\n\
         If the student submitted math steps, comment on whether the reasoning is correct.\n\
         Respond with JSON only: {{\"acknowledgment\": \"<one sentence>\", \"next_question\": \"<question>\"}}",
    )
}

fn build_messages(
    window: &[(String, String)],
    request: &TurnRequest,
    answer: &str,
    candidate: Option<&str>,
    prior_turns: usize,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(window.len() * 2 + 1);
    for (question, previous_answer) in window {
        messages.push(ChatMessage::assistant(question.clone()));
        messages.push(ChatMessage::user(previous_answer.clone()));
    }

    let mut latest = format!(
        "Question {} of {}: {}\nStudent answer: {}\n",
        prior_turns + 1,
        MAX_TURNS,
        request.current_question,
        answer
    );

    let phase = PHASES[(prior_turns + 1) % PHASES.len()];
    latest.push_str(&format!("Next interview phase: {}\n", phase));

    if let Some(candidate) = candidate {
        latest.push_str(&format!(
            "Suggested next question (rephrase or adapt if it fits better): {}\n",
            candidate
        ));
    }

    messages.push(ChatMessage::user(latest));
    messages
}
