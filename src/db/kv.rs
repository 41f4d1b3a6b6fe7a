use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use crate::db::connection::Database;
use crate::db::KeyValueStore;
use crate::errors::{TrackerError, TrackerResult};

/// Key-value store backed by the `kv_store` SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        let raw: Option<String> = self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| TrackerError::DbError(format!("read {key} failed: {e}")))
        })?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> TrackerResult<()> {
        let text = serde_json::to_string(&value)?;
        let now = Utc::now();

        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, text, now],
            )
            .map_err(|e| TrackerError::DbError(format!("write {key} failed: {e}")))?;
            Ok(())
        })
    }
}
