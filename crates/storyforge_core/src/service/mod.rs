//! Entity use-case services.
//!
//! # Responsibility
//! - Bind one `KeyValueStore` namespace to one entity kind.
//! - Expose template factories, CRUD, sub-item edits and derived reports.
//!
//! # Invariants
//! - Services never call each other; composition belongs to the caller.
//! - Reads return `None`/empty for absence; targeted writes return errors.
//! - `delete_*` returns `false` instead of an error on storage failure.

pub mod character_service;
pub mod checklist_service;
pub mod entity;
pub mod error;
pub mod interview_service;
pub mod narrative_service;
pub mod scene_service;
pub mod world_service;
