//! Character dossier model.
//!
//! # Invariants
//! - `basicInfo.name` must be non-blank before a save.
//! - Relationship ids are unique inside one character.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

/// Narrative function of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterRole {
    Protagonist,
    Antagonist,
    Deuteragonist,
    #[default]
    Supporting,
    Minor,
}

/// Direction of change across the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcType {
    Positive,
    Negative,
    #[default]
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub age: Option<u32>,
    pub role: CharacterRole,
    pub occupation: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Physical {
    pub appearance: String,
    pub distinguishing_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personality {
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub flaws: Vec<String>,
    pub fears: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Backstory {
    pub summary: String,
    /// The past wound that drives the character's misbelief.
    pub ghost: String,
    pub key_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Motivation {
    /// What the character consciously pursues.
    pub want: String,
    /// What the character actually lacks.
    pub need: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    /// Linked character record, when the other party is modeled.
    #[serde(default)]
    pub character_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl Relationship {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("rel"),
            character_id: None,
            name: name.into(),
            kind: kind.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterArc {
    pub arc_type: ArcType,
    pub starting_state: String,
    pub ending_state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub physical: Physical,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub backstory: Backstory,
    #[serde(default)]
    pub motivation: Motivation,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub arc: CharacterArc,
    #[serde(default)]
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Character {
    /// Blank, unsaved character for `project_id`.
    pub fn template(project_id: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: generate_id(),
            project_id: project_id.into(),
            basic_info: BasicInfo::default(),
            physical: Physical::default(),
            personality: Personality::default(),
            backstory: Backstory::default(),
            motivation: Motivation::default(),
            relationships: Vec::new(),
            arc: CharacterArc::default(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.basic_info.name
    }
}

impl StoredRecord for Character {
    const KIND: &'static str = "character";

    fn id(&self) -> &str {
        &self.id
    }

    fn project_id(&self) -> Option<&str> {
        Some(&self.project_id)
    }

    fn touch(&mut self, now_epoch_ms: i64) {
        self.updated_at = now_epoch_ms;
    }

    fn validation_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.basic_info.name.trim().is_empty() {
            issues.push("character name is required".to_string());
        }
        if let Some(age) = self.basic_info.age {
            if age > 10_000 {
                issues.push(format!("character age {age} is out of range"));
            }
        }
        for (list, entries) in [
            ("traits", &self.personality.traits),
            ("strengths", &self.personality.strengths),
            ("flaws", &self.personality.flaws),
            ("fears", &self.personality.fears),
        ] {
            if entries.iter().any(|entry| entry.trim().is_empty()) {
                issues.push(format!("personality {list} must not contain blank entries"));
            }
        }
        issues
    }
}

/// Typed single-field edits for `Character`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterField {
    Name(String),
    Age(Option<u32>),
    Role(CharacterRole),
    Occupation(String),
    Appearance(String),
    BackstorySummary(String),
    Ghost(String),
    Want(String),
    Need(String),
    ArcType(ArcType),
    ArcStart(String),
    ArcEnd(String),
    Notes(String),
}

impl CharacterField {
    pub fn apply(self, character: &mut Character) {
        match self {
            Self::Name(value) => character.basic_info.name = value,
            Self::Age(value) => character.basic_info.age = value,
            Self::Role(value) => character.basic_info.role = value,
            Self::Occupation(value) => character.basic_info.occupation = value,
            Self::Appearance(value) => character.physical.appearance = value,
            Self::BackstorySummary(value) => character.backstory.summary = value,
            Self::Ghost(value) => character.backstory.ghost = value,
            Self::Want(value) => character.motivation.want = value,
            Self::Need(value) => character.motivation.need = value,
            Self::ArcType(value) => character.arc.arc_type = value,
            Self::ArcStart(value) => character.arc.starting_state = value,
            Self::ArcEnd(value) => character.arc.ending_state = value,
            Self::Notes(value) => character.notes = value,
        }
    }
}

/// Which personality list a trait edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitList {
    Traits,
    Strengths,
    Flaws,
    Fears,
}

impl TraitList {
    pub fn select(self, personality: &mut Personality) -> &mut Vec<String> {
        match self {
            Self::Traits => &mut personality.traits,
            Self::Strengths => &mut personality.strengths,
            Self::Flaws => &mut personality.flaws,
            Self::Fears => &mut personality.fears,
        }
    }
}
