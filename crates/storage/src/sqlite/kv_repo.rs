use sqlx::{Row, SqlitePool};

use crate::repository::{KeyValueStore, Namespace, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// One namespace of the `SQLite` database exposed as a key-value store.
#[derive(Clone)]
pub struct SqliteKeyValue {
    pool: SqlitePool,
    namespace: Namespace,
}

impl SqliteKeyValue {
    #[must_use]
    pub fn new(pool: SqlitePool, namespace: Namespace) -> Self {
        Self { pool, namespace }
    }

    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqliteKeyValue {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        // Table names come from `Namespace::table`, never from input.
        let sql = format!("SELECT value FROM {} WHERE key = ?1", self.namespace.table());
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| row.try_get::<String, _>("value").map_err(ser))
            .transpose()
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let sql = format!(
            r"
            INSERT INTO {} (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            self.namespace.table()
        );
        sqlx::query(&sql)
            .bind(key)
            .bind(value)
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
