//! Turn submission request and the event frames streamed back

use internlink_common::sse::SseFrame;
use serde::{Deserialize, Serialize};

use crate::utils::MathStep;

/// Maximum number of answered turns in one session
pub const MAX_TURNS: usize = 12;

/// POST /api/interview/respond request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TurnRequest {
    pub session_id: String,
    /// Free-text answer; may be empty when `math_steps` carries the answer
    #[serde(default)]
    pub user_response: String,
    /// The question the learner just answered
    pub current_question: String,
    pub interview_category: String,
    #[serde(default)]
    pub interview_subcategory: String,
    pub difficulty_level: String,
    #[serde(default)]
    pub math_steps: Option<Vec<MathStep>>,
}

impl TurnRequest {
    /// Math steps, if any were submitted
    pub fn steps(&self) -> Option<&[MathStep]> {
        self.math_steps.as_deref().filter(|s| !s.is_empty())
    }
}

/// Answered-turn counter sent with progress frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnProgress {
    pub answered: usize,
    pub total: usize,
}

impl TurnProgress {
    pub fn new(answered: usize) -> Self {
        Self {
            answered: answered.min(MAX_TURNS),
            total: MAX_TURNS,
        }
    }
}

/// One frame of the turn event stream
///
/// Serialized as `{"type": ..., "acknowledgment"?, "next_question"?,
/// "progress"?, "error"?}`. A stream always ends with exactly one of
/// `done`, `complete` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    Start,
    Progress {
        progress: TurnProgress,
    },
    Done {
        acknowledgment: String,
        next_question: String,
        progress: TurnProgress,
    },
    Complete {
        #[serde(skip_serializing_if = "Option::is_none")]
        acknowledgment: Option<String>,
        progress: TurnProgress,
    },
    Error {
        error: String,
    },
}

impl TurnEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnEvent::Done { .. } | TurnEvent::Complete { .. } | TurnEvent::Error { .. }
        )
    }
}

impl SseFrame for TurnEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TurnEvent::Start => "start",
            TurnEvent::Progress { .. } => "progress",
            TurnEvent::Done { .. } => "done",
            TurnEvent::Complete { .. } => "complete",
            TurnEvent::Error { .. } => "error",
        }
    }
}
