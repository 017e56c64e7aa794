//! Persistence core for the StoryForge writing assistant.
//! Namespaced record storage plus one CRUD service per entity kind.

pub mod config;
pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod score;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, ScoringConfig};
pub use id::{generate_id, generate_prefixed_id, now_epoch_ms};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::character::{
    ArcType, Character, CharacterField, CharacterRole, Relationship, TraitList,
};
pub use model::checklist::{ChecklistCategory, ChecklistItem, ChecklistTemplate, ProjectChecklist};
pub use model::interview::{InterviewQuestion, InterviewSession, InterviewStatus};
pub use model::narrative::{NarrativeFramework, NarrativeStructure, StoryBeat};
pub use model::progress::Progress;
pub use model::scene::{Scene, SceneBeat, SceneField, SceneStatus};
pub use model::world::{Culture, Location, MagicSystem, WorldBuilding, WorldField};
pub use score::{ConsistencyIssue, ConsistencyReport, ConsistencyRule};
pub use service::character_service::CharacterService;
pub use service::checklist_service::{ChecklistProgressReport, ChecklistService};
pub use service::entity::EntityService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::interview_service::InterviewService;
pub use service::narrative_service::NarrativeService;
pub use service::scene_service::SceneService;
pub use service::world_service::WorldService;
pub use store::kv::{KeyValueStore, StoreError, StoreResult};
pub use store::memory::{MemoryBackend, MemoryKeyValueStore};
pub use store::namespace::Namespace;
pub use store::record::StoredRecord;
pub use store::sqlite::SqliteKeyValueStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
