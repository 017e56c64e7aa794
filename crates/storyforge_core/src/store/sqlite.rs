//! SQLite-backed `KeyValueStore`.
//!
//! # Invariants
//! - All statements are scoped by `namespace`; one handle never sees rows
//!   of another namespace.
//! - `get_all_raw` orders by `record_id ASC`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use crate::store::namespace::Namespace;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Namespace-scoped store over the `kv_records` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
    namespace: Namespace,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Creates a store handle from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the connection did not come from
    ///   `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection, namespace: Namespace) -> StoreResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn, namespace })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn get_raw(&self, id: &str) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_records WHERE namespace = ?1 AND record_id = ?2;",
                params![self.namespace.as_str(), id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn get_all_raw(&self) -> StoreResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT record_id, payload
             FROM kv_records
             WHERE namespace = ?1
             ORDER BY record_id ASC;",
        )?;
        let mut rows = stmt.query([self.namespace.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push((row.get("record_id")?, row.get("payload")?));
        }
        Ok(records)
    }

    fn set_raw(&self, id: &str, payload: String) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_records (namespace, record_id, payload)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, record_id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.namespace.as_str(), id, payload],
        )?;
        debug!(
            "event=kv_set module=store status=ok backend=sqlite namespace={} id={}",
            self.namespace, id
        );
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM kv_records WHERE namespace = ?1 AND record_id = ?2;",
            params![self.namespace.as_str(), id],
        )?;
        debug!(
            "event=kv_remove module=store status=ok backend=sqlite namespace={} id={} removed={}",
            self.namespace,
            id,
            changed > 0
        );
        Ok(())
    }
}
