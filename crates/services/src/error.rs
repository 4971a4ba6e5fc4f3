//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuestionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizSequencer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    MalformedQuestion(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("malformed session payload for {id}: {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
