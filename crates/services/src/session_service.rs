use std::sync::Arc;

use quiz_core::parse_cookies;
use serde::Serialize;
use storage::repository::KeyValueStore;
use tracing::debug;

use crate::error::SessionError;

/// A session resolved from the session store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: String,
    pub payload: serde_json::Value,
}

impl Session {
    /// User identifier carried in the payload, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.payload.get("user").and_then(serde_json::Value::as_str)
    }
}

/// Resolves the optional session cookie against the session store.
#[derive(Clone)]
pub struct SessionService {
    cookie_name: String,
    sessions: Arc<dyn KeyValueStore>,
}

impl SessionService {
    #[must_use]
    pub fn new(cookie_name: impl Into<String>, sessions: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions,
        }
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Look up the session named by the `Cookie` header.
    ///
    /// Returns `Ok(None)` when the header carries no session cookie or the
    /// store does not know the id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Malformed` if the stored payload is not JSON.
    /// Returns `SessionError::Storage` if the store cannot be reached.
    pub async fn lookup(&self, cookie_header: &str) -> Result<Option<Session>, SessionError> {
        let cookies = parse_cookies(cookie_header);
        let Some(id) = cookies.get(&self.cookie_name) else {
            return Ok(None);
        };

        let Some(raw) = self.sessions.get(id).await? else {
            debug!(cookie = %self.cookie_name, "unknown session id");
            return Ok(None);
        };

        let payload = serde_json::from_str(&raw).map_err(|source| SessionError::Malformed {
            id: id.clone(),
            source,
        })?;
        Ok(Some(Session {
            id: id.clone(),
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryStore;

    fn service(entries: &[(&str, &str)]) -> SessionService {
        let store = InMemoryStore::with_entries(entries.iter().copied());
        SessionService::new("drk-session", Arc::new(store))
    }

    #[tokio::test]
    async fn resolves_known_session() {
        let svc = service(&[("abc", r#"{"user":"ana"}"#)]);

        let session = svc
            .lookup("quizA-1=x; drk-session=abc")
            .await
            .unwrap()
            .expect("session");

        assert_eq!(session.id, "abc");
        assert_eq!(session.user(), Some("ana"));
    }

    #[tokio::test]
    async fn missing_cookie_is_none() {
        let svc = service(&[("abc", "{}")]);
        assert!(svc.lookup("other=1").await.unwrap().is_none());
        assert!(svc.lookup("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let svc = service(&[]);
        assert!(svc.lookup("drk-session=nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let svc = service(&[("abc", "not json")]);
        let err = svc.lookup("drk-session=abc").await.unwrap_err();
        assert!(matches!(err, SessionError::Malformed { .. }));
    }

    #[tokio::test]
    async fn session_id_is_percent_decoded() {
        let svc = service(&[("a b", r#"{"user":"bo"}"#)]);
        let session = svc.lookup("drk-session=a%20b").await.unwrap().unwrap();
        assert_eq!(session.user(), Some("bo"));
        assert_eq!(svc.cookie_name(), "drk-session");
    }
}
