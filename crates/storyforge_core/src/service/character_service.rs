//! Character use-case service.
//!
//! # Responsibility
//! - CRUD for character dossiers under the `characters` namespace.
//! - Typed field/list edits as whole-record read-modify-write.
//! - Rule-based consistency report.

use crate::config::ScoringConfig;
use crate::model::character::{ArcType, Character, CharacterField, Relationship, TraitList};
use crate::score::{evaluate, filled, ConsistencyReport, ConsistencyRule};
use crate::service::entity::EntityService;
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::kv::KeyValueStore;
use crate::store::record::StoredRecord;

pub struct CharacterService<S: KeyValueStore> {
    entities: EntityService<Character, S>,
    scoring: ScoringConfig,
}

impl<S: KeyValueStore> CharacterService<S> {
    pub fn new(store: S, scoring: ScoringConfig) -> Self {
        Self {
            entities: EntityService::new(store),
            scoring,
        }
    }

    /// Unsaved blank character with a fresh id.
    pub fn create_character_template(&self, project_id: &str) -> Character {
        Character::template(project_id)
    }

    /// Saves a character. Requires a non-blank name.
    pub fn save_character(&self, character: Character) -> ServiceResult<Character> {
        self.entities.save(character)
    }

    pub fn get_character_by_id(&self, id: &str) -> ServiceResult<Option<Character>> {
        self.entities.get_by_id(id)
    }

    pub fn get_all_characters(&self) -> ServiceResult<Vec<Character>> {
        self.entities.get_all()
    }

    pub fn get_characters_by_project(&self, project_id: &str) -> ServiceResult<Vec<Character>> {
        self.entities.get_by_project(project_id)
    }

    pub fn delete_character(&self, id: &str) -> bool {
        self.entities.delete(id)
    }

    pub fn update_character_field(
        &self,
        id: &str,
        field: CharacterField,
    ) -> ServiceResult<Character> {
        self.entities.update_with(id, |character| {
            field.apply(character);
            Ok(())
        })
    }

    /// Appends `value` to one personality list, skipping exact duplicates.
    /// Blank values are rejected without touching the record.
    pub fn add_trait(&self, id: &str, list: TraitList, value: &str) -> ServiceResult<Character> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ServiceError::Validation {
                kind: Character::KIND,
                issues: vec!["personality entries must not be blank".to_string()],
            });
        }
        self.entities.update_with(id, |character| {
            let entries = list.select(&mut character.personality);
            if !entries.iter().any(|existing| *existing == value) {
                entries.push(value);
            }
            Ok(())
        })
    }

    pub fn add_relationship(
        &self,
        id: &str,
        relationship: Relationship,
    ) -> ServiceResult<Character> {
        self.entities.update_with(id, |character| {
            character.relationships.push(relationship);
            Ok(())
        })
    }

    pub fn remove_relationship(&self, id: &str, relationship_id: &str) -> ServiceResult<Character> {
        self.entities.update_with(id, |character| {
            let before = character.relationships.len();
            character
                .relationships
                .retain(|relationship| relationship.id != relationship_id);
            if character.relationships.len() == before {
                return Err(ServiceError::sub_item(
                    Character::KIND,
                    id,
                    "relationship",
                    relationship_id,
                ));
            }
            Ok(())
        })
    }

    pub fn character_consistency(&self, character: &Character) -> ConsistencyReport {
        evaluate(&character_rules(&self.scoring), character, &self.scoring)
    }
}

/// Declarative rule list for character dossiers.
pub fn character_rules(scoring: &ScoringConfig) -> Vec<ConsistencyRule<Character>> {
    let min_traits = scoring.min_personality_traits;
    let min_relationships = scoring.min_relationships;

    vec![
        ConsistencyRule::new("missing_name", "Character has no name", |c: &Character| {
            filled(&c.basic_info.name)
        }),
        ConsistencyRule::new(
            "few_traits",
            format!("List at least {min_traits} personality traits"),
            move |c: &Character| c.personality.traits.len() >= min_traits,
        ),
        ConsistencyRule::new("missing_flaws", "Give the character a flaw", |c: &Character| {
            !c.personality.flaws.is_empty()
        }),
        ConsistencyRule::new(
            "trait_flaw_overlap",
            "A trait is also listed as a flaw",
            |c: &Character| {
                !c.personality.traits.iter().any(|personality_trait| {
                    c.personality
                        .flaws
                        .iter()
                        .any(|flaw| flaw.trim().eq_ignore_ascii_case(personality_trait.trim()))
                })
            },
        ),
        ConsistencyRule::new("missing_want", "Define what the character wants", |c: &Character| {
            filled(&c.motivation.want)
        }),
        ConsistencyRule::new("missing_need", "Define what the character needs", |c: &Character| {
            filled(&c.motivation.need)
        }),
        ConsistencyRule::new(
            "want_equals_need",
            "Want and need are identical, so there is no inner conflict",
            |c: &Character| {
                !(filled(&c.motivation.want)
                    && c.motivation
                        .want
                        .trim()
                        .eq_ignore_ascii_case(c.motivation.need.trim()))
            },
        ),
        ConsistencyRule::new("missing_ghost", "Backstory has no defining wound", |c: &Character| {
            filled(&c.backstory.ghost)
        }),
        ConsistencyRule::new(
            "few_relationships",
            format!("Add at least {min_relationships} relationship(s)"),
            move |c: &Character| c.relationships.len() >= min_relationships,
        ),
        ConsistencyRule::new(
            "static_changing_arc",
            "A changing arc needs different start and end states",
            |c: &Character| match c.arc.arc_type {
                ArcType::Flat => true,
                ArcType::Positive | ArcType::Negative => {
                    filled(&c.arc.starting_state)
                        && filled(&c.arc.ending_state)
                        && c.arc.starting_state.trim() != c.arc.ending_state.trim()
                }
            },
        ),
    ]
}
