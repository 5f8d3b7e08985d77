//! Static question source
//!
//! Questions come from the hand-authored bank in [`super::question_bank`].
//! Selection is keyed by (category, subcategory, difficulty); when nothing
//! matches, a generic phase question keeps the interview moving.

use rand::seq::SliceRandom;
use tracing::debug;

use super::question_bank::{BankEntry, PHASE_QUESTIONS, QUESTION_BANK};

/// Characters of lowercase prefix used to recognise an already-asked question
pub const DEDUP_PREFIX_CHARS: usize = 30;

/// Phase names, in interview order
pub const PHASES: [&str; 5] = ["introduction", "experience", "technical", "challenges", "goals"];

/// Read-only question lookup
#[derive(Debug, Clone, Copy)]
pub struct QuestionSource {
    entries: &'static [BankEntry],
}

impl Default for QuestionSource {
    fn default() -> Self {
        Self::new(QUESTION_BANK)
    }
}

impl QuestionSource {
    pub fn new(entries: &'static [BankEntry]) -> Self {
        Self { entries }
    }

    /// Ordered bank questions for a key
    ///
    /// Keys are matched case-insensitively with `_` and spaces treated as
    /// `-`. Difficulty also accepts `easy`/`medium`/`hard`. An empty
    /// subcategory matches every subcategory of the category. Unknown keys
    /// yield an empty list.
    pub fn questions_for(
        &self,
        category: &str,
        subcategory: &str,
        difficulty: &str,
    ) -> Vec<&'static str> {
        let category = normalize_key(category);
        let subcategory = normalize_key(subcategory);
        let difficulty = normalize_difficulty(difficulty);

        self.entries
            .iter()
            .filter(|e| e.category == category && e.difficulty == difficulty)
            .filter(|e| subcategory.is_empty() || e.subcategory == subcategory)
            .flat_map(|e| e.questions.iter().copied())
            .collect()
    }

    /// Generic fallback question for a 0-based turn index
    ///
    /// Phases cycle by `turn_index % 5`; within a phase the question rotates
    /// every full cycle.
    pub fn phase_question(&self, turn_index: usize) -> &'static str {
        let phase = PHASE_QUESTIONS[turn_index % PHASE_QUESTIONS.len()];
        phase[(turn_index / PHASE_QUESTIONS.len()) % phase.len()]
    }

    /// Random bank question not yet asked in this session
    ///
    /// A question counts as asked when its first 30 lowercase characters
    /// equal those of any entry in `asked`. Questions that only differ after
    /// that prefix are treated as duplicates; near duplicates that differ
    /// within it are not caught.
    pub fn pick_unused<S: AsRef<str>>(
        &self,
        category: &str,
        subcategory: &str,
        difficulty: &str,
        asked: &[S],
    ) -> Option<&'static str> {
        let asked_prefixes: Vec<String> = asked.iter().map(|q| dedup_prefix(q.as_ref())).collect();

        let candidates: Vec<&'static str> = self
            .questions_for(category, subcategory, difficulty)
            .into_iter()
            .filter(|q| !asked_prefixes.contains(&dedup_prefix(q)))
            .collect();

        debug!(
            category,
            subcategory,
            difficulty,
            candidates = candidates.len(),
            "Selecting unused bank question"
        );

        candidates.choose(&mut rand::thread_rng()).copied()
    }

    /// First question of a new session
    pub fn opening_question(
        &self,
        category: &str,
        subcategory: &str,
        difficulty: &str,
    ) -> &'static str {
        self.questions_for(category, subcategory, difficulty)
            .first()
            .copied()
            .unwrap_or_else(|| self.phase_question(0))
    }
}

/// Lowercase prefix used for duplicate detection
pub fn dedup_prefix(question: &str) -> String {
    question
        .trim()
        .to_lowercase()
        .chars()
        .take(DEDUP_PREFIX_CHARS)
        .collect()
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

fn normalize_difficulty(difficulty: &str) -> String {
    let key = normalize_key(difficulty);
    match key.as_str() {
        "easy" => "beginner".to_string(),
        "medium" => "intermediate".to_string(),
        "hard" => "advanced".to_string(),
        _ => key,
    }
}
