//! Generic CRUD over one entity kind.
//!
//! # Responsibility
//! - Read, list, filter, save and delete records of one `StoredRecord` type.
//! - Run field updates as read-modify-write of the whole record.
//!
//! # Invariants
//! - `save` validates before writing; a rejected record never reaches storage.
//! - Project filtering is a linear scan over `get_all`.
//! - `update_with` never lets the closure change the record id.

use crate::id::now_epoch_ms;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;
use log::{error, info, warn};
use std::marker::PhantomData;

/// CRUD service bound to the store namespace of `T`.
pub struct EntityService<T, S> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<T: StoredRecord, S: KeyValueStore> EntityService<T, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads one record; `None` when absent.
    pub fn get_by_id(&self, id: &str) -> ServiceResult<Option<T>> {
        Ok(self.store.get(id)?)
    }

    /// Loads every record in the namespace.
    pub fn get_all(&self) -> ServiceResult<Vec<T>> {
        Ok(self.store.get_all()?)
    }

    /// Records whose `project_id()` equals `project_id`.
    pub fn get_by_project(&self, project_id: &str) -> ServiceResult<Vec<T>> {
        self.filter(|record| record.project_id() == Some(project_id))
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> ServiceResult<Vec<T>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// Validates, stamps `updated_at` and writes the whole record.
    pub fn save(&self, mut record: T) -> ServiceResult<T> {
        let issues = record.validation_issues();
        if !issues.is_empty() {
            warn!(
                "event=entity_save module=service status=rejected kind={} id={} issue_count={}",
                T::KIND,
                record.id(),
                issues.len()
            );
            return Err(ServiceError::Validation {
                kind: T::KIND,
                issues,
            });
        }

        record.touch(now_epoch_ms());
        if let Err(err) = self.store.set(record.id(), &record) {
            error!(
                "event=entity_save module=service status=error kind={} namespace={} id={} error={}",
                T::KIND,
                self.store.namespace(),
                record.id(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=entity_save module=service status=ok kind={} namespace={} id={}",
            T::KIND,
            self.store.namespace(),
            record.id()
        );
        Ok(record)
    }

    /// Removes a record.
    ///
    /// Returns `false` only when storage failed; deleting an absent id is
    /// a successful no-op.
    pub fn delete(&self, id: &str) -> bool {
        match self.store.remove(id) {
            Ok(()) => {
                info!(
                    "event=entity_delete module=service status=ok kind={} namespace={} id={}",
                    T::KIND,
                    self.store.namespace(),
                    id
                );
                true
            }
            Err(err) => {
                error!(
                    "event=entity_delete module=service status=error kind={} namespace={} id={} error={}",
                    T::KIND,
                    self.store.namespace(),
                    id,
                    err
                );
                false
            }
        }
    }

    /// Reads the record, applies `update`, saves the whole record back.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - Whatever `update` returns; nothing is written in that case.
    /// - `IdChanged` when `update` rewrote the id.
    pub fn update_with<F>(&self, id: &str, update: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut T) -> ServiceResult<()>,
    {
        let mut record = self
            .get_by_id(id)?
            .ok_or_else(|| ServiceError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        update(&mut record)?;
        if record.id() != id {
            return Err(ServiceError::IdChanged {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        self.save(record)
    }
}

#[cfg(test)]
mod tests {
    use super::EntityService;
    use crate::service::error::ServiceError;
    use crate::store::kv::KeyValueStore;
    use crate::store::memory::{MemoryBackend, MemoryKeyValueStore};
    use crate::store::namespace::Namespace;
    use crate::store::record::StoredRecord;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        project: String,
        text: String,
        updated: i64,
    }

    impl StoredRecord for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn project_id(&self) -> Option<&str> {
            Some(&self.project)
        }

        fn touch(&mut self, now_epoch_ms: i64) {
            self.updated = now_epoch_ms;
        }

        fn validation_issues(&self) -> Vec<String> {
            if self.text.is_empty() {
                vec!["text is required".to_string()]
            } else {
                Vec::new()
            }
        }
    }

    fn note(id: &str, project: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            project: project.into(),
            text: text.into(),
            updated: 0,
        }
    }

    fn service() -> EntityService<Note, MemoryKeyValueStore> {
        EntityService::new(MemoryKeyValueStore::new(Namespace::new("notes").unwrap()))
    }

    #[test]
    fn save_stamps_updated_and_persists() {
        let service = service();
        let saved = service.save(note("n1", "p", "hello")).unwrap();
        assert!(saved.updated > 0);
        assert_eq!(service.get_by_id("n1").unwrap(), Some(saved));
    }

    #[test]
    fn invalid_record_is_not_written() {
        let service = service();
        let err = service.save(note("n1", "p", "")).unwrap_err();
        assert!(matches!(err, ServiceError::Validation { kind: "note", ref issues } if issues.len() == 1));
        assert!(service.get_by_id("n1").unwrap().is_none());
    }

    #[test]
    fn update_with_missing_record_is_not_found() {
        let service = service();
        let err = service
            .update_with("ghost", |n| {
                n.text = "x".into();
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { ref id, .. } if id == "ghost"));
    }

    #[test]
    fn update_with_rejects_id_change() {
        let service = service();
        service.save(note("n1", "p", "hello")).unwrap();
        let err = service
            .update_with("n1", |n| {
                n.id = "n2".into();
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::IdChanged { .. }));
        assert!(service.get_by_id("n2").unwrap().is_none());
    }

    #[test]
    fn failing_update_closure_leaves_record_untouched() {
        let service = service();
        service.save(note("n1", "p", "hello")).unwrap();
        let err = service
            .update_with("n1", |n| {
                n.text = "changed".into();
                Err(ServiceError::sub_item("note", "n1", "line", "l9"))
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::SubItemNotFound { .. }));
        assert_eq!(service.get_by_id("n1").unwrap().unwrap().text, "hello");
    }

    #[test]
    fn delete_is_idempotent_for_absent_ids() {
        let service = service();
        service.save(note("n1", "p", "hello")).unwrap();
        assert!(service.delete("n1"));
        assert!(service.delete("n1"));
        assert!(service.get_by_id("n1").unwrap().is_none());
    }

    #[test]
    fn quota_failure_surfaces_as_store_error() {
        let store = MemoryBackend::with_quota_bytes(8).store(Namespace::new("notes").unwrap());
        let service: EntityService<Note, _> = EntityService::new(store);
        let err = service.save(note("n1", "p", "too long to fit")).unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(service.store().get_all_raw().unwrap().is_empty());
    }
}
