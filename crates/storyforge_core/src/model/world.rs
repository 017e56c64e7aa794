//! World-building bible model.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Free-form label such as `city` or `forest`.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl Location {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("loc"),
            name: name.into(),
            kind: kind.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub customs: Vec<String>,
}

impl Culture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("cult"),
            name: name.into(),
            values: Vec::new(),
            customs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MagicSystem {
    pub name: String,
    pub rules: Vec<String>,
    pub costs: String,
    pub limitations: String,
}

impl MagicSystem {
    pub fn is_defined(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBuilding {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub cultures: Vec<Culture>,
    #[serde(default)]
    pub magic_system: MagicSystem,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub history: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WorldBuilding {
    pub fn template(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: generate_id(),
            project_id: project_id.into(),
            name: name.into(),
            overview: String::new(),
            genre: String::new(),
            locations: Vec::new(),
            cultures: Vec::new(),
            magic_system: MagicSystem::default(),
            technology: String::new(),
            history: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl StoredRecord for WorldBuilding {
    const KIND: &'static str = "world";

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
        if self.name.trim().is_empty() {
            issues.push("world name is required".to_string());
        }
        if self
            .locations
            .iter()
            .any(|location| location.name.trim().is_empty())
        {
            issues.push("every location needs a name".to_string());
        }
        if self.cultures.iter().any(|culture| culture.name.trim().is_empty()) {
            issues.push("every culture needs a name".to_string());
        }
        issues
    }
}

/// Typed single-field edits for `WorldBuilding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldField {
    Name(String),
    Overview(String),
    Genre(String),
    Technology(String),
    History(String),
    MagicSystemName(String),
    MagicCosts(String),
    MagicLimitations(String),
    MagicRules(Vec<String>),
}

impl WorldField {
    pub fn apply(self, world: &mut WorldBuilding) {
        match self {
            Self::Name(value) => world.name = value,
            Self::Overview(value) => world.overview = value,
            Self::Genre(value) => world.genre = value,
            Self::Technology(value) => world.technology = value,
            Self::History(value) => world.history = value,
            Self::MagicSystemName(value) => world.magic_system.name = value,
            Self::MagicCosts(value) => world.magic_system.costs = value,
            Self::MagicLimitations(value) => world.magic_system.limitations = value,
            Self::MagicRules(value) => world.magic_system.rules = value,
        }
    }
}
