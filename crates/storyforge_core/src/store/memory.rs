//! In-memory `KeyValueStore` used as a test double and scratch medium.
//!
//! # Invariants
//! - Every handle produced by one `MemoryBackend` shares the same data.
//! - A write rejected by the quota leaves the previous value untouched.
//! - Handles are single-threaded (`Rc`), matching the store's scheduling model.

use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use crate::store::namespace::Namespace;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    namespaces: BTreeMap<Namespace, BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryState {
    fn used_bytes(&self) -> usize {
        self.namespaces
            .values()
            .flat_map(|records| records.iter())
            .map(|(id, payload)| entry_size(id, payload))
            .sum()
    }
}

/// Shared in-memory medium; clone it to hand out more handles.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium that rejects writes once keys plus payloads would
    /// exceed `limit` bytes across all namespaces.
    pub fn with_quota_bytes(limit: usize) -> Self {
        let backend = Self::default();
        backend.state.borrow_mut().quota_bytes = Some(limit);
        backend
    }

    /// Opens a handle bound to `namespace`.
    pub fn store(&self, namespace: Namespace) -> MemoryKeyValueStore {
        MemoryKeyValueStore {
            backend: self.clone(),
            namespace,
        }
    }

    /// Bytes currently occupied by keys and payloads.
    pub fn used_bytes(&self) -> usize {
        self.state.borrow().used_bytes()
    }
}

/// Namespace-scoped handle over a `MemoryBackend`.
#[derive(Debug, Clone)]
pub struct MemoryKeyValueStore {
    backend: MemoryBackend,
    namespace: Namespace,
}

impl MemoryKeyValueStore {
    /// Shortcut for a handle over a fresh, unbounded backend.
    pub fn new(namespace: Namespace) -> Self {
        MemoryBackend::new().store(namespace)
    }

    pub fn backend(&self) -> &MemoryBackend {
        &self.backend
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn get_raw(&self, id: &str) -> StoreResult<Option<String>> {
        let state = self.backend.state.borrow();
        Ok(state
            .namespaces
            .get(&self.namespace)
            .and_then(|records| records.get(id))
            .cloned())
    }

    fn get_all_raw(&self) -> StoreResult<Vec<(String, String)>> {
        let state = self.backend.state.borrow();
        Ok(state
            .namespaces
            .get(&self.namespace)
            .map(|records| {
                records
                    .iter()
                    .map(|(id, payload)| (id.clone(), payload.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set_raw(&self, id: &str, payload: String) -> StoreResult<()> {
        let mut state = self.backend.state.borrow_mut();

        if let Some(limit) = state.quota_bytes {
            let previous = state
                .namespaces
                .get(&self.namespace)
                .and_then(|records| records.get(id))
                .map_or(0, |old| entry_size(id, old));
            let required_bytes = state.used_bytes() - previous + entry_size(id, &payload);
            if required_bytes > limit {
                return Err(StoreError::QuotaExceeded {
                    namespace: self.namespace.to_string(),
                    id: id.to_string(),
                    limit_bytes: limit,
                    required_bytes,
                });
            }
        }

        state
            .namespaces
            .entry(self.namespace.clone())
            .or_default()
            .insert(id.to_string(), payload);
        Ok(())
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let mut state = self.backend.state.borrow_mut();
        if let Some(records) = state.namespaces.get_mut(&self.namespace) {
            records.remove(id);
        }
        Ok(())
    }
}

fn entry_size(id: &str, payload: &str) -> usize {
    id.len() + payload.len()
}
