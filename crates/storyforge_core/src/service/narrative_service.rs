//! Narrative structure use-case service.

use crate::model::narrative::{NarrativeFramework, NarrativeStructure, StoryBeat};
use crate::model::progress::Progress;
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;

pub struct NarrativeService<S: KeyValueStore> {
    entities: EntityService<NarrativeStructure, S>,
}

impl<S: KeyValueStore> NarrativeService<S> {
    pub fn new(store: S) -> Self {
        Self {
            entities: EntityService::new(store),
        }
    }

    pub fn create_narrative_template(
        &self,
        project_id: &str,
        name: &str,
        framework: NarrativeFramework,
    ) -> NarrativeStructure {
        NarrativeStructure::template(project_id, name, framework)
    }

    pub fn save_narrative(&self, structure: NarrativeStructure) -> ServiceResult<NarrativeStructure> {
        self.entities.save(structure)
    }

    pub fn get_narrative_by_id(&self, id: &str) -> ServiceResult<Option<NarrativeStructure>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_narratives(&self) -> ServiceResult<Vec<NarrativeStructure>> {
        self.entities.get_all()
    }

    pub fn get_narratives_by_project(
        &self,
        project_id: &str,
    ) -> ServiceResult<Vec<NarrativeStructure>> {
        self.entities.get_by_project(project_id)
    }

    pub fn delete_narrative(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    pub fn set_beat_completed(
        &self,
        id: &str,
        beat_id: &str,
        completed: bool,
    ) -> ServiceResult<NarrativeStructure> {
        self.update_beat(id, beat_id, |beat| beat.completed = completed)
    }

    pub fn update_beat_notes(
        &self,
        id: &str,
        beat_id: &str,
        notes: &str,
    ) -> ServiceResult<NarrativeStructure> {
        self.update_beat(id, beat_id, |beat| beat.notes = notes.to_string())
    }

    pub fn assign_beat_chapter(
        &self,
        id: &str,
        beat_id: &str,
        chapter: Option<u32>,
    ) -> ServiceResult<NarrativeStructure> {
        self.update_beat(id, beat_id, |beat| beat.chapter = chapter)
    }

    /// Inserts a custom beat at `position` (clamped to the end).
    pub fn insert_beat(
        &self,
        id: &str,
        position: usize,
        name: &str,
    ) -> ServiceResult<NarrativeStructure> {
        self.entities.update_with(id, |structure| {
            let position = position.min(structure.beats.len());
            structure.beats.insert(position, StoryBeat::new(name));
            Ok(())
        })
    }

    pub fn narrative_progress(&self, structure: &NarrativeStructure) -> Progress {
        structure.progress()
    }

    fn update_beat(
        &self,
        id: &str,
        beat_id: &str,
        edit: impl FnOnce(&mut StoryBeat),
    ) -> ServiceResult<NarrativeStructure> {
        self.entities.update_with(id, |structure| {
            let beat = structure.beat_mut(beat_id).ok_or_else(|| {
                ServiceError::sub_item(NarrativeStructure::KIND, id, "beat", beat_id)
            })?;
            edit(beat);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NarrativeService;
    use crate::model::narrative::NarrativeFramework;
    use crate::service::error::ServiceError;
    use crate::store::memory::MemoryKeyValueStore;
    use crate::store::namespace::Namespace;

    fn service() -> NarrativeService<MemoryKeyValueStore> {
        NarrativeService::new(MemoryKeyValueStore::new(
            Namespace::new(Namespace::NARRATIVES).unwrap(),
        ))
    }

    #[test]
    fn completing_beats_moves_progress() {
        let service = service();
        let structure = service
            .save_narrative(service.create_narrative_template(
                "p1",
                "Outline",
                NarrativeFramework::SaveTheCat,
            ))
            .unwrap();
        let mut latest = structure.clone();
        for beat in structure.beats.iter().take(3) {
            latest = service.set_beat_completed(&structure.id, &beat.id, true).unwrap();
        }
        let progress = service.narrative_progress(&latest);
        assert_eq!((progress.completed, progress.total, progress.percentage), (3, 15, 20));
    }

    #[test]
    fn beat_edits_persist_and_unknown_beat_fails() {
        let service = service();
        let structure = service
            .save_narrative(service.create_narrative_template(
                "p1",
                "Outline",
                NarrativeFramework::ThreeAct,
            ))
            .unwrap();
        let beat_id = structure.beats[4].id.clone();

        service
            .update_beat_notes(&structure.id, &beat_id, "false victory")
            .unwrap();
        service
            .assign_beat_chapter(&structure.id, &beat_id, Some(12))
            .unwrap();
        let stored = service.get_narrative_by_id(&structure.id).unwrap().unwrap();
        assert_eq!(stored.beats[4].notes, "false victory");
        assert_eq!(stored.beats[4].chapter, Some(12));

        let err = service
            .set_beat_completed(&structure.id, "beat_missing", true)
            .unwrap_err();
        assert!(matches!(err, ServiceError::SubItemNotFound { item: "beat", .. }));
    }

    #[test]
    fn insert_beat_clamps_position() {
        let service = service();
        let structure = service
            .save_narrative(service.create_narrative_template(
                "p1",
                "Loose",
                NarrativeFramework::Custom,
            ))
            .unwrap();
        let structure = service.insert_beat(&structure.id, 99, "Cold open").unwrap();
        let structure = service.insert_beat(&structure.id, 0, "Prologue").unwrap();
        let names: Vec<_> = structure.beats.iter().map(|beat| beat.name.as_str()).collect();
        assert_eq!(names, vec!["Prologue", "Cold open"]);
    }
}
