use serde::{Deserialize, Serialize};

/// Outcome of grading a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub is_correct: bool,
    #[serde(rename = "correctIndex")]
    pub correct_option_index: u64,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Graded(AnswerResult),
    /// No question exists at the current index; progress was left untouched.
    Exhausted,
}
