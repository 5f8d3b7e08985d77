//! Pure helpers shared by the interview services

pub mod math_notation;
pub mod model_output;
pub mod transcript;

pub use math_notation::{count_step_markers, to_linear_notation, MathStep};
pub use transcript::{count_question_markers, format_turn, parse_turns, TranscriptTurn};
