use std::sync::Arc;

use storage::repository::Storage;

use crate::error::ServicesError;
use crate::quiz_service::QuizSequencer;
use crate::session_service::SessionService;

/// Assembles request-facing services over one `Storage`.
#[derive(Clone)]
pub struct QuizServices {
    sequencer: Arc<QuizSequencer>,
    sessions: Option<Arc<SessionService>>,
}

impl QuizServices {
    /// Build services over an existing storage.
    ///
    /// The session lookup is enabled only when `session_cookie` is set.
    #[must_use]
    pub fn new(storage: &Storage, session_cookie: Option<&str>) -> Self {
        let sequencer = Arc::new(QuizSequencer::new(Arc::clone(&storage.questions)));
        let sessions = session_cookie
            .map(|name| Arc::new(SessionService::new(name, Arc::clone(&storage.sessions))));
        Self {
            sequencer,
            sessions,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        session_cookie: Option<&str>,
    ) -> Result<Self, ServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, session_cookie))
    }

    #[must_use]
    pub fn sequencer(&self) -> Arc<QuizSequencer> {
        Arc::clone(&self.sequencer)
    }

    #[must_use]
    pub fn sessions(&self) -> Option<Arc<SessionService>> {
        self.sessions.as_ref().map(Arc::clone)
    }
}
