//! Interview services

pub mod completion_client;
pub mod question_bank;
pub mod question_source;
pub mod report_renderer;
pub mod scorer;
pub mod turn_controller;

pub use completion_client::{ChatMessage, ChatRole, CompletionClient, CompletionError, OpenAiClient};
pub use question_source::QuestionSource;
pub use report_renderer::render_report;
pub use scorer::{
    parse_score_response, placeholder_score, profile_completeness, ScoreError, Scorer,
    SessionCompleter, PROFILE_BLEND_THRESHOLD,
};
pub use turn_controller::{parse_model_reply, TurnController, TurnError};
