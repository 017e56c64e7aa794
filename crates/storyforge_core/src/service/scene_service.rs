//! Scene use-case service.

use crate::config::ScoringConfig;
use crate::model::scene::{Scene, SceneBeat, SceneField};
use crate::score::{evaluate, filled, ConsistencyReport, ConsistencyRule};
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;

pub struct SceneService<S: KeyValueStore> {
    entities: EntityService<Scene, S>,
    scoring: ScoringConfig,
}

impl<S: KeyValueStore> SceneService<S> {
    pub fn new(store: S, scoring: ScoringConfig) -> Self {
        Self {
            entities: EntityService::new(store),
            scoring,
        }
    }

    pub fn create_scene_template(&self, project_id: &str, title: &str) -> Scene {
        Scene::template(project_id, title)
    }

    pub fn save_scene(&self, scene: Scene) -> ServiceResult<Scene> {
        self.entities.save(scene)
    }

    pub fn get_scene_by_id(&self, id: &str) -> ServiceResult<Option<Scene>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_scenes(&self) -> ServiceResult<Vec<Scene>> {
        self.entities.get_all()
    }

    pub fn get_scenes_by_project(&self, project_id: &str) -> ServiceResult<Vec<Scene>> {
        self.entities.get_by_project(project_id)
    }

    /// Project scenes ordered by chapter; unassigned scenes go last.
    pub fn get_scenes_in_reading_order(&self, project_id: &str) -> ServiceResult<Vec<Scene>> {
        let mut scenes = self.get_scenes_by_project(project_id)?;
        scenes.sort_by_key(|scene| (scene.chapter.unwrap_or(u32::MAX), scene.created_at));
        Ok(scenes)
    }

    pub fn delete_scene(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    pub fn update_scene_field(&self, id: &str, field: SceneField) -> ServiceResult<Scene> {
        self.entities.update_with(id, |scene| {
            field.apply(scene);
            Ok(())
        })
    }

    /// Appends a beat. A blank description fails validation and nothing is written.
    pub fn add_beat(&self, id: &str, description: &str) -> ServiceResult<Scene> {
        self.entities.update_with(id, |scene| {
            scene.beats.push(SceneBeat::new(description));
            Ok(())
        })
    }

    pub fn set_beat_completed(
        &self,
        id: &str,
        beat_id: &str,
        completed: bool,
    ) -> ServiceResult<Scene> {
        self.entities.update_with(id, |scene| {
            let beat = scene
                .beats
                .iter_mut()
                .find(|beat| beat.id == beat_id)
                .ok_or_else(|| ServiceError::sub_item(Scene::KIND, id, "beat", beat_id))?;
            beat.completed = completed;
            Ok(())
        })
    }

    pub fn remove_beat(&self, id: &str, beat_id: &str) -> ServiceResult<Scene> {
        self.entities.update_with(id, |scene| {
            let before = scene.beats.len();
            scene.beats.retain(|beat| beat.id != beat_id);
            if scene.beats.len() == before {
                return Err(ServiceError::sub_item(Scene::KIND, id, "beat", beat_id));
            }
            Ok(())
        })
    }

    /// Adds a character to the cast; already-present ids are ignored.
    pub fn add_character_present(&self, id: &str, character_id: &str) -> ServiceResult<Scene> {
        self.entities.update_with(id, |scene| {
            if !scene.characters_present.iter().any(|c| c == character_id) {
                scene.characters_present.push(character_id.to_string());
            }
            Ok(())
        })
    }

    pub fn scene_consistency(&self, scene: &Scene) -> ConsistencyReport {
        evaluate(&scene_rules(&self.scoring), scene, &self.scoring)
    }
}

/// Declarative rule list for scene cards.
pub fn scene_rules(scoring: &ScoringConfig) -> Vec<ConsistencyRule<Scene>> {
    let min_beats = scoring.min_scene_beats;
    let min_cast = scoring.min_characters_present;

    vec![
        ConsistencyRule::new("missing_title", "Scene has no title", |s: &Scene| {
            filled(&s.title)
        }),
        ConsistencyRule::new("missing_goal", "What does the POV character want here?", |s: &Scene| {
            filled(&s.goal)
        }),
        ConsistencyRule::new("missing_conflict", "Nothing stands in the way", |s: &Scene| {
            filled(&s.conflict)
        }),
        ConsistencyRule::new("missing_outcome", "Scene has no outcome", |s: &Scene| {
            filled(&s.outcome)
        }),
        ConsistencyRule::new("missing_location", "Scene has no location", |s: &Scene| {
            filled(&s.location)
        }),
        ConsistencyRule::new(
            "few_beats",
            format!("Outline at least {min_beats} beats"),
            move |s: &Scene| s.beats.len() >= min_beats,
        ),
        ConsistencyRule::new(
            "few_characters",
            format!("Put at least {min_cast} character(s) on stage"),
            move |s: &Scene| s.characters_present.len() >= min_cast,
        ),
        ConsistencyRule::new(
            "pov_not_present",
            "POV character is not in the scene",
            |s: &Scene| match &s.pov_character_id {
                Some(pov) => s.characters_present.iter().any(|c| c == pov),
                None => true,
            },
        ),
    ]
}
