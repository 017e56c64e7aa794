//! Namespaced key-value persistence.
//!
//! # Responsibility
//! - Define the `KeyValueStore` port every entity service writes through.
//! - Provide a SQLite-backed store and an in-memory fake.
//!
//! # Invariants
//! - One store handle is bound to exactly one `Namespace`.
//! - `set` replaces the whole stored value; nothing is merged.
//! - Absent ids read as `None` and remove as a no-op.
//! - Concurrent handles on the same namespace are unguarded: last write wins.

pub mod kv;
pub mod memory;
pub mod namespace;
pub mod record;
pub mod sqlite;
