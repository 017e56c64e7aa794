//! Scene card model.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

/// Drafting state. Set directly by the caller, no transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    #[default]
    Planned,
    Drafted,
    Revised,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBeat {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl SceneBeat {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("sbeat"),
            description: description.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub chapter: Option<u32>,
    #[serde(default)]
    pub pov_character_id: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub conflict: String,
    #[serde(default)]
    pub outcome: String,
    /// Character record ids on stage.
    #[serde(default)]
    pub characters_present: Vec<String>,
    #[serde(default)]
    pub beats: Vec<SceneBeat>,
    #[serde(default)]
    pub status: SceneStatus,
    #[serde(default)]
    pub word_count_target: Option<u32>,
    #[serde(default)]
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Scene {
    pub fn template(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: generate_id(),
            project_id: project_id.into(),
            title: title.into(),
            chapter: None,
            pov_character_id: None,
            location: String::new(),
            goal: String::new(),
            conflict: String::new(),
            outcome: String::new(),
            characters_present: Vec::new(),
            beats: Vec::new(),
            status: SceneStatus::Planned,
            word_count_target: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl StoredRecord for Scene {
    const KIND: &'static str = "scene";

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
        if self.title.trim().is_empty() {
            issues.push("scene title is required".to_string());
        }
        if self.chapter == Some(0) {
            issues.push("chapter numbers start at 1".to_string());
        }
        if self.beats.iter().any(|beat| beat.description.trim().is_empty()) {
            issues.push("scene beat description is required".to_string());
        }
        issues
    }
}

/// Typed single-field edits for `Scene`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneField {
    Title(String),
    Chapter(Option<u32>),
    PovCharacter(Option<String>),
    Location(String),
    Goal(String),
    Conflict(String),
    Outcome(String),
    Status(SceneStatus),
    WordCountTarget(Option<u32>),
    Notes(String),
}

impl SceneField {
    pub fn apply(self, scene: &mut Scene) {
        match self {
            Self::Title(value) => scene.title = value,
            Self::Chapter(value) => scene.chapter = value,
            Self::PovCharacter(value) => scene.pov_character_id = value,
            Self::Location(value) => scene.location = value,
            Self::Goal(value) => scene.goal = value,
            Self::Conflict(value) => scene.conflict = value,
            Self::Outcome(value) => scene.outcome = value,
            Self::Status(value) => scene.status = value,
            Self::WordCountTarget(value) => scene.word_count_target = value,
            Self::Notes(value) => scene.notes = value,
        }
    }
}
