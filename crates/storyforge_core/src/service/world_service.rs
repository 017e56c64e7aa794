//! World-building use-case service.

use crate::config::ScoringConfig;
use crate::model::world::{Culture, Location, WorldBuilding, WorldField};
use crate::score::{evaluate, filled, ConsistencyReport, ConsistencyRule};
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;
use std::collections::HashSet;

pub struct WorldService<S: KeyValueStore> {
    entities: EntityService<WorldBuilding, S>,
    scoring: ScoringConfig,
}

impl<S: KeyValueStore> WorldService<S> {
    pub fn new(store: S, scoring: ScoringConfig) -> Self {
        Self {
            entities: EntityService::new(store),
            scoring,
        }
    }

    pub fn create_world_template(&self, project_id: &str, name: &str) -> WorldBuilding {
        WorldBuilding::template(project_id, name)
    }

    pub fn save_world(&self, world: WorldBuilding) -> ServiceResult<WorldBuilding> {
        self.entities.save(world)
    }

    pub fn get_world_by_id(&self, id: &str) -> ServiceResult<Option<WorldBuilding>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_worlds(&self) -> ServiceResult<Vec<WorldBuilding>> {
        self.entities.get_all()
    }

    pub fn get_worlds_by_project(&self, project_id: &str) -> ServiceResult<Vec<WorldBuilding>> {
        self.entities.get_by_project(project_id)
    }

    pub fn delete_world(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    pub fn update_world_field(&self, id: &str, field: WorldField) -> ServiceResult<WorldBuilding> {
        self.entities.update_with(id, |world| {
            field.apply(world);
            Ok(())
        })
    }

    pub fn add_location(&self, id: &str, location: Location) -> ServiceResult<WorldBuilding> {
        self.entities.update_with(id, |world| {
            world.locations.push(location);
            Ok(())
        })
    }

    pub fn remove_location(&self, id: &str, location_id: &str) -> ServiceResult<WorldBuilding> {
        self.entities.update_with(id, |world| {
            let before = world.locations.len();
            world.locations.retain(|location| location.id != location_id);
            if world.locations.len() == before {
                return Err(ServiceError::sub_item(
                    WorldBuilding::KIND,
                    id,
                    "location",
                    location_id,
                ));
            }
            Ok(())
        })
    }

    pub fn add_culture(&self, id: &str, culture: Culture) -> ServiceResult<WorldBuilding> {
        self.entities.update_with(id, |world| {
            world.cultures.push(culture);
            Ok(())
        })
    }

    pub fn remove_culture(&self, id: &str, culture_id: &str) -> ServiceResult<WorldBuilding> {
        self.entities.update_with(id, |world| {
            let before = world.cultures.len();
            world.cultures.retain(|culture| culture.id != culture_id);
            if world.cultures.len() == before {
                return Err(ServiceError::sub_item(
                    WorldBuilding::KIND,
                    id,
                    "culture",
                    culture_id,
                ));
            }
            Ok(())
        })
    }

    pub fn world_consistency(&self, world: &WorldBuilding) -> ConsistencyReport {
        evaluate(&world_rules(&self.scoring), world, &self.scoring)
    }
}

/// Declarative rule list for world bibles.
pub fn world_rules(scoring: &ScoringConfig) -> Vec<ConsistencyRule<WorldBuilding>> {
    let min_locations = scoring.min_world_locations;
    let min_cultures = scoring.min_world_cultures;

    vec![
        ConsistencyRule::new("missing_name", "World has no name", |w: &WorldBuilding| {
            filled(&w.name)
        }),
        ConsistencyRule::new("missing_overview", "Write a short overview", |w: &WorldBuilding| {
            filled(&w.overview)
        }),
        ConsistencyRule::new(
            "few_locations",
            format!("Describe at least {min_locations} locations"),
            move |w: &WorldBuilding| w.locations.len() >= min_locations,
        ),
        ConsistencyRule::new(
            "few_cultures",
            format!("Describe at least {min_cultures} culture(s)"),
            move |w: &WorldBuilding| w.cultures.len() >= min_cultures,
        ),
        ConsistencyRule::new(
            "duplicate_location_names",
            "Two locations share a name",
            |w: &WorldBuilding| {
                let mut seen = HashSet::new();
                w.locations
                    .iter()
                    .all(|location| seen.insert(location.name.trim().to_lowercase()))
            },
        ),
        ConsistencyRule::new(
            "magic_without_rules",
            "Magic system has no rules",
            |w: &WorldBuilding| !w.magic_system.is_defined() || !w.magic_system.rules.is_empty(),
        ),
        ConsistencyRule::new(
            "magic_without_cost",
            "Magic system has no cost",
            |w: &WorldBuilding| !w.magic_system.is_defined() || filled(&w.magic_system.costs),
        ),
    ]
}
