use serde::{Deserialize, Serialize};

use crate::error::QuestionError;
use crate::model::ids::QuestionKey;

/// A trivia question as stored in the external store.
///
/// Stored shape: `{"question": "...", "options": ["..."], "answer": 2}` where
/// `answer` is the zero-based index of the correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "answer")]
    pub correct_option_index: u64,
}

impl QuizQuestion {
    /// Parses the stored JSON payload of the question at `key`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::Malformed` if the payload is not a valid question.
    pub fn from_json(key: QuestionKey, json: &str) -> Result<Self, QuestionError> {
        serde_json::from_str(json).map_err(|source| QuestionError::Malformed {
            key: key.store_key(),
            source,
        })
    }

    #[must_use]
    pub fn is_correct(&self, answer: u64) -> bool {
        answer == self.correct_option_index
    }

    /// Client-facing view without the correct option.
    #[must_use]
    pub fn view(&self) -> QuestionView {
        QuestionView {
            question: self.text.clone(),
            options: self.options.clone(),
        }
    }
}

/// What a client sees before answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

/// Result of looking up the question for the current progress.
///
/// `Exhausted` is the normal end of a quiz, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionLookup {
    Found(QuizQuestion),
    Exhausted,
}

impl QuestionLookup {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuestionLookup::Exhausted)
    }
}
