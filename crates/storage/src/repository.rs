use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Logical key spaces kept by the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Question payloads keyed by their decimal index.
    Questions,
    /// Session payloads keyed by session id.
    Sessions,
}

impl Namespace {
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Namespace::Questions => "questions",
            Namespace::Sessions => "sessions",
        }
    }
}

/// Opaque get-by-key store. Values are JSON text owned by whoever wrote them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Build a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates the quiz key spaces behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn KeyValueStore>,
    pub sessions: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn new(questions: Arc<dyn KeyValueStore>, sessions: Arc<dyn KeyValueStore>) -> Self {
        Self {
            questions,
            sessions,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        let questions: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let sessions: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self {
            questions,
            sessions,
        }
    }

    #[must_use]
    pub fn namespace(&self, namespace: Namespace) -> Arc<dyn KeyValueStore> {
        match namespace {
            Namespace::Questions => Arc::clone(&self.questions),
            Namespace::Sessions => Arc::clone(&self.sessions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryStore::new();
        store.put("1", r#"{"a":1}"#).await.unwrap();
        assert_eq!(store.get("1").await.unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.put("1", r#"{"a":2}"#).await.unwrap();
        assert_eq!(store.get("1").await.unwrap().as_deref(), Some(r#"{"a":2}"#));
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let storage = Storage::in_memory();
        storage.questions.put("1", "q").await.unwrap();

        assert!(storage.namespace(Namespace::Questions).get("1").await.unwrap().is_some());
        assert!(storage.namespace(Namespace::Sessions).get("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn with_entries_prepopulates() {
        let store = InMemoryStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn namespace_tables() {
        assert_eq!(Namespace::Questions.table(), "questions");
        assert_eq!(Namespace::Sessions.table(), "sessions");
    }
}
