use std::sync::Arc;

use quiz_core::model::{
    AnswerResult, ProgressState, QuestionLookup, QuizQuestion, SubmitOutcome,
};
use storage::repository::KeyValueStore;
use tracing::debug;

use crate::error::QuizError;

/// Serves questions in key order and grades submissions against the store.
#[derive(Clone)]
pub struct QuizSequencer {
    questions: Arc<dyn KeyValueStore>,
}

impl QuizSequencer {
    #[must_use]
    pub fn new(questions: Arc<dyn KeyValueStore>) -> Self {
        Self { questions }
    }

    /// Fetch the question at `state.index()`.
    ///
    /// Returns `QuestionLookup::Exhausted` when the store has no entry for the
    /// index, which marks the end of the quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::MalformedQuestion` if the stored payload is not a question.
    /// Returns `QuizError::Storage` if the store cannot be reached.
    pub async fn current_question(
        &self,
        state: &ProgressState,
    ) -> Result<QuestionLookup, QuizError> {
        let key = state.index();
        let Some(json) = self.questions.get(&key.store_key()).await? else {
            debug!(%key, "no question stored, quiz exhausted");
            return Ok(QuestionLookup::Exhausted);
        };
        let question = QuizQuestion::from_json(key, &json)?;
        Ok(QuestionLookup::Found(question))
    }

    /// Grade `answer` against the current question and advance `state`.
    ///
    /// The question is fetched before anything is mutated, so on
    /// `SubmitOutcome::Exhausted` or on error `state` is left as it was.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSequencer::current_question`].
    pub async fn submit_answer(
        &self,
        state: &mut ProgressState,
        answer: u64,
    ) -> Result<SubmitOutcome, QuizError> {
        let question = match self.current_question(state).await? {
            QuestionLookup::Found(question) => question,
            QuestionLookup::Exhausted => return Ok(SubmitOutcome::Exhausted),
        };

        let result = AnswerResult {
            is_correct: question.is_correct(answer),
            correct_option_index: question.correct_option_index,
        };
        state.record_answer(result.is_correct);
        debug!(
            key = %state.index(),
            is_correct = result.is_correct,
            "graded submission"
        );

        Ok(SubmitOutcome::Graded(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use quiz_core::model::QuestionKey;
    use std::sync::Mutex;
    use storage::repository::{InMemoryStore, StorageError};

    const QUESTION: &str =
        r#"{"question":"Test question","options":["A","B","C","D"],"answer":2}"#;

    /// Records requested keys so tests can assert on the store contract.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryStore,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl KeyValueStore for RecordingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.requested.lock().unwrap().push(key.to_owned());
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.put(key, value).await
        }
    }

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("store offline".into()))
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("store offline".into()))
        }
    }

    fn sequencer_with(entries: &[(&str, &str)]) -> QuizSequencer {
        let store = InMemoryStore::with_entries(entries.iter().copied());
        QuizSequencer::new(Arc::new(store))
    }

    #[tokio::test]
    async fn current_question_fetches_by_decimal_key() {
        let store = Arc::new(RecordingStore::default());
        store.put("1", QUESTION).await.unwrap();
        let sequencer = QuizSequencer::new(store.clone());

        let lookup = sequencer
            .current_question(&ProgressState::fresh())
            .await
            .unwrap();

        let QuestionLookup::Found(question) = lookup else {
            panic!("expected a question");
        };
        assert_eq!(question.text, "Test question");
        assert_eq!(question.options, vec!["A", "B", "C", "D"]);
        assert_eq!(*store.requested.lock().unwrap(), vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn missing_question_is_exhausted() {
        let sequencer = sequencer_with(&[]);
        let state = ProgressState::new(QuestionKey::new(2), 1, 1);

        let lookup = sequencer.current_question(&state).await.unwrap();
        assert!(lookup.is_exhausted());
    }

    #[tokio::test]
    async fn malformed_question_is_an_error() {
        let sequencer = sequencer_with(&[("3", "invalid JSON")]);
        let state = ProgressState::new(QuestionKey::new(3), 0, 2);

        let err = sequencer.current_question(&state).await.unwrap_err();
        assert!(matches!(err, QuizError::MalformedQuestion(_)));
    }

    #[tokio::test]
    async fn correct_submission_advances_and_scores() {
        let sequencer = sequencer_with(&[("1", QUESTION)]);
        let mut state = ProgressState::fresh();

        let outcome = sequencer.submit_answer(&mut state, 2).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Graded(AnswerResult {
                is_correct: true,
                correct_option_index: 2,
            })
        );
        assert_eq!(state, ProgressState::new(QuestionKey::new(2), 1, 1));
    }

    #[tokio::test]
    async fn incorrect_submission_advances_without_scoring() {
        let sequencer = sequencer_with(&[("1", QUESTION)]);
        let mut state = ProgressState::fresh();

        let outcome = sequencer.submit_answer(&mut state, 1).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Graded(AnswerResult {
                is_correct: false,
                correct_option_index: 2,
            })
        );
        assert_eq!(state, ProgressState::new(QuestionKey::new(2), 0, 1));
    }

    #[tokio::test]
    async fn exhausted_submission_leaves_state_untouched() {
        let sequencer = sequencer_with(&[("1", QUESTION)]);
        let mut state = ProgressState::new(QuestionKey::new(2), 1, 1);

        let outcome = sequencer.submit_answer(&mut state, 0).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Exhausted);
        assert_eq!(state, ProgressState::new(QuestionKey::new(2), 1, 1));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched() {
        let sequencer = QuizSequencer::new(Arc::new(FailingStore));
        let mut state = ProgressState::fresh();

        let err = sequencer.submit_answer(&mut state, 2).await.unwrap_err();

        assert!(matches!(err, QuizError::Storage(_)));
        assert_eq!(state, ProgressState::fresh());
    }
}
