//! Key-value reads and writes for the snapshot document.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    snapshot::Snapshot,
    store::{SnapshotStore, SNAPSHOT_KEY},
};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv WHERE key = ?1";
const SELECT_UPDATED_AT_SQL: &str = "SELECT updated_at FROM kv WHERE key = ?1";

impl super::Database {
    /// Reads a raw value.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query stored value")
    }

    /// Writes a raw value, replacing any previous one.
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_VALUE_SQL,
            params![key, value, Timestamp::now().to_string()],
        )
        .db_context("Failed to store value")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Deletes a raw value, returning whether it existed.
    pub fn delete_value(&mut self, key: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete value")?;
        Ok(deleted > 0)
    }

    /// When a value was last written.
    pub fn updated_at(&self, key: &str) -> Result<Option<Timestamp>> {
        let raw: Option<String> = self
            .connection
            .query_row(SELECT_UPDATED_AT_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query update time")?;

        raw.map(|value| {
            value.parse::<Timestamp>().map_err(|e| {
                UpkeepError::database("Invalid stored timestamp").with_source(
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)),
                )
            })
        })
        .transpose()
    }
}

impl SnapshotStore for super::Database {
    fn load(&self) -> Result<Option<Snapshot>> {
        self.get_value(SNAPSHOT_KEY)?
            .map(|json| Snapshot::from_json(&json))
            .transpose()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.put_value(SNAPSHOT_KEY, &json)
    }
}
