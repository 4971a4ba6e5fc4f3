use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionKey;

//
// ─── PROGRESS STATE ───────────────────────────────────────────────────────────
//

/// Client-held quiz progress: the question to serve next and the running score.
///
/// The serialized field names (`key`, `correct`, `total`) are what deployed
/// clients already carry in their cookies and must not change.
///
/// Decoding reconstructs the values verbatim. A tampered cookie may carry
/// `correct > total`; see [`ProgressState::is_consistent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(rename = "key")]
    index: QuestionKey,
    #[serde(rename = "correct")]
    correct_count: u64,
    #[serde(rename = "total")]
    total_count: u64,
}

impl ProgressState {
    #[must_use]
    pub fn new(index: QuestionKey, correct_count: u64, total_count: u64) -> Self {
        Self {
            index,
            correct_count,
            total_count,
        }
    }

    /// State for a client that has not answered anything yet.
    #[must_use]
    pub fn fresh() -> Self {
        Self::new(QuestionKey::FIRST, 0, 0)
    }

    #[must_use]
    pub fn index(&self) -> QuestionKey {
        self.index
    }

    #[must_use]
    pub fn correct_count(&self) -> u64 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns true if the score could have been produced by real submissions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.index.value() >= 1 && self.correct_count <= self.total_count
    }

    /// Records one graded submission and moves on to the next question.
    pub fn record_answer(&mut self, is_correct: bool) {
        self.total_count = self.total_count.saturating_add(1);
        self.index = self.index.next();
        if is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::fresh()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_starts_at_first_question() {
        let state = ProgressState::fresh();
        assert_eq!(state.index(), QuestionKey::new(1));
        assert_eq!(state.correct_count(), 0);
        assert_eq!(state.total_count(), 0);
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn record_correct_answer_advances_and_scores() {
        let mut state = ProgressState::fresh();
        state.record_answer(true);
        assert_eq!(state, ProgressState::new(QuestionKey::new(2), 1, 1));
    }

    #[test]
    fn record_incorrect_answer_only_counts_total() {
        let mut state = ProgressState::fresh();
        state.record_answer(false);
        assert_eq!(state, ProgressState::new(QuestionKey::new(2), 0, 1));
    }

    #[test]
    fn serializes_with_cookie_field_names() {
        let state = ProgressState::new(QuestionKey::new(5), 3, 10);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"key":5,"correct":3,"total":10}"#);
    }

    #[test]
    fn consistency_flags_tampered_scores() {
        assert!(ProgressState::new(QuestionKey::new(3), 2, 2).is_consistent());
        assert!(!ProgressState::new(QuestionKey::new(3), 5, 2).is_consistent());
        assert!(!ProgressState::new(QuestionKey::new(0), 0, 0).is_consistent());
    }

    #[test]
    fn counters_saturate() {
        let mut state = ProgressState::new(QuestionKey::new(u64::MAX), u64::MAX, u64::MAX);
        state.record_answer(true);
        assert_eq!(state.total_count(), u64::MAX);
        assert_eq!(state.correct_count(), u64::MAX);
        assert_eq!(state.index(), QuestionKey::new(u64::MAX));
    }
}
