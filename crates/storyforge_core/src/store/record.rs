//! Contract shared by every entity persisted through a `KeyValueStore`.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A JSON-serializable record with a stable string id.
///
/// `id` never changes after creation and is unique inside its namespace.
pub trait StoredRecord: Serialize + DeserializeOwned {
    /// Human-readable entity label used in errors and log events.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Advisory foreign key used only for in-memory filtering.
    fn project_id(&self) -> Option<&str> {
        None
    }

    /// Stamps the last-modified time before a save.
    fn touch(&mut self, now_epoch_ms: i64);

    /// Human-readable problems that block a save. Empty means valid.
    fn validation_issues(&self) -> Vec<String> {
        Vec::new()
    }
}
