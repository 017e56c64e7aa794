//! Entity shapes persisted by the services.
//!
//! # Responsibility
//! - Define the JSON layout of every entity kind (camelCase keys).
//! - Provide typed field accessors ("lenses") per entity kind.
//!
//! # Invariants
//! - Every entity carries a client-generated `id` that never changes.
//! - `projectId` is an advisory foreign key; nothing enforces it.
//! - Nested sections default when missing so older records still load.

pub mod character;
pub mod checklist;
pub mod interview;
pub mod narrative;
pub mod progress;
pub mod scene;
pub mod world;
