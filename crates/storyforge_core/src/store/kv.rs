//! `KeyValueStore` port and its error type.
//!
//! # Responsibility
//! - Define the four record operations (`get`, `get_all`, `set`, `remove`).
//! - Own the JSON round-trip so backends only move text.
//!
//! # Invariants
//! - Serialization happens before any backend write; a record that fails to
//!   serialize never touches storage.
//! - Stored text that no longer parses is reported, not skipped.

use crate::db::DbError;
use crate::store::namespace::Namespace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store backends.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Record could not be encoded as JSON.
    Serialization {
        namespace: String,
        id: String,
        source: serde_json::Error,
    },
    /// Stored JSON does not decode into the requested shape.
    InvalidData {
        namespace: String,
        id: String,
        source: serde_json::Error,
    },
    /// Write would exceed the medium's capacity.
    QuotaExceeded {
        namespace: String,
        id: String,
        limit_bytes: usize,
        required_bytes: usize,
    },
    /// Namespace name is malformed.
    InvalidNamespace(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization {
                namespace,
                id,
                source,
            } => write!(f, "failed to serialize `{namespace}/{id}`: {source}"),
            Self::InvalidData {
                namespace,
                id,
                source,
            } => write!(f, "invalid stored data at `{namespace}/{id}`: {source}"),
            Self::QuotaExceeded {
                namespace,
                id,
                limit_bytes,
                required_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{namespace}/{id}`: needs {required_bytes} bytes, limit {limit_bytes}"
            ),
            Self::InvalidNamespace(name) => write!(f, "invalid namespace: `{name}`"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidData { source, .. } => Some(source),
            Self::QuotaExceeded { .. } => None,
            Self::InvalidNamespace(_) => None,
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Namespaced record storage.
///
/// Backends implement the `*_raw` methods over JSON text; callers use the
/// typed `get`/`get_all`/`set`/`remove` methods.
pub trait KeyValueStore {
    /// Namespace this handle reads and writes.
    fn namespace(&self) -> &Namespace;

    /// Loads the stored JSON text for one id.
    fn get_raw(&self, id: &str) -> StoreResult<Option<String>>;

    /// Loads `(id, json)` pairs for the whole namespace.
    fn get_all_raw(&self) -> StoreResult<Vec<(String, String)>>;

    /// Upserts JSON text for one id.
    fn set_raw(&self, id: &str, payload: String) -> StoreResult<()>;

    /// Deletes one id. Absent ids are a no-op.
    fn remove(&self, id: &str) -> StoreResult<()>;

    /// Fetches one record, `None` when absent.
    fn get<T: DeserializeOwned>(&self, id: &str) -> StoreResult<Option<T>> {
        match self.get_raw(id)? {
            Some(payload) => decode(self.namespace(), id, &payload).map(Some),
            None => Ok(None),
        }
    }

    /// Fetches every record in the namespace.
    fn get_all<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        self.get_all_raw()?
            .into_iter()
            .map(|(id, payload)| decode(self.namespace(), &id, &payload))
            .collect()
    }

    /// Upserts a record, replacing any previous value wholesale.
    fn set<T: Serialize>(&self, id: &str, record: &T) -> StoreResult<()> {
        let payload =
            serde_json::to_string(record).map_err(|source| StoreError::Serialization {
                namespace: self.namespace().to_string(),
                id: id.to_string(),
                source,
            })?;
        self.set_raw(id, payload)
    }
}

fn decode<T: DeserializeOwned>(namespace: &Namespace, id: &str, payload: &str) -> StoreResult<T> {
    serde_json::from_str(payload).map_err(|source| StoreError::InvalidData {
        namespace: namespace.to_string(),
        id: id.to_string(),
        source,
    })
}
