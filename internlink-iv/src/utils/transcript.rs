//! Plain-text transcript backup
//!
//! Every turn is appended to `interview_sessions.transcript` as
//!
//! ```text
//! Q3: <question on one line>
//! A3: <answer on one line>
//! ```
//!
//! The transcript is the fallback record when structured response rows are
//! missing, so the format must stay parseable: entries are flattened to a
//! single line each and markers only count at line starts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Q(\d+):").expect("question marker regex is valid"));

static ENTRY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([QA])(\d+):\s?(.*)$").expect("entry regex is valid"));

/// One Q/A pair recovered from a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptTurn {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

/// Format one turn for appending to the transcript
pub fn format_turn(turn_number: usize, question: &str, answer: &str) -> String {
    format!(
        "Q{n}: {q}\nA{n}: {a}\n",
        n = turn_number,
        q = flatten(question),
        a = flatten(answer)
    )
}

/// Number of `Q<number>:` markers, i.e. turns recorded in the transcript
pub fn count_question_markers(transcript: &str) -> usize {
    QUESTION_MARKER.find_iter(transcript).count()
}

/// Recover Q/A pairs in transcript order
///
/// Lines that carry no marker are treated as continuations of the previous
/// entry (older transcripts were written with raw multi-line answers). A
/// question without an answer line yields an empty answer.
pub fn parse_turns(transcript: &str) -> Vec<TranscriptTurn> {
    let mut turns: Vec<TranscriptTurn> = Vec::new();
    let mut in_answer = false;

    for line in transcript.lines() {
        if let Some(caps) = ENTRY_LINE.captures(line) {
            let number = caps[2].parse().unwrap_or(turns.len() + 1);
            let text = caps[3].trim().to_string();
            if &caps[1] == "Q" {
                turns.push(TranscriptTurn {
                    number,
                    question: text,
                    answer: String::new(),
                });
                in_answer = false;
            } else if let Some(turn) = turns.last_mut() {
                turn.answer = text;
                in_answer = true;
            }
            continue;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(turn) = turns.last_mut() {
            let target = if in_answer {
                &mut turn.answer
            } else {
                &mut turn.question
            };
            if !target.is_empty() {
                target.push(' ');
            }
            target.push_str(line);
        }
    }

    turns
}

/// Render turns back into transcript text (used for prompts)
pub fn render_turns(turns: &[TranscriptTurn]) -> String {
    turns
        .iter()
        .map(|t| format_turn(t.number, &t.question, &t.answer))
        .collect()
}

fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
