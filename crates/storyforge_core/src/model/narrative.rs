//! Narrative structure (beat sheet) model.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::model::progress::Progress;
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

/// Beat-sheet framework a structure was seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeFramework {
    #[default]
    ThreeAct,
    HerosJourney,
    SaveTheCat,
    /// No seeded beats.
    Custom,
}

impl NarrativeFramework {
    pub fn beat_names(self) -> &'static [&'static str] {
        match self {
            Self::ThreeAct => &[
                "Setup",
                "Inciting Incident",
                "Plot Point One",
                "Rising Action",
                "Midpoint",
                "Plot Point Two",
                "Climax",
                "Resolution",
            ],
            Self::HerosJourney => &[
                "Ordinary World",
                "Call to Adventure",
                "Refusal of the Call",
                "Meeting the Mentor",
                "Crossing the Threshold",
                "Tests, Allies, Enemies",
                "Approach to the Inmost Cave",
                "Ordeal",
                "Reward",
                "The Road Back",
                "Resurrection",
                "Return with the Elixir",
            ],
            Self::SaveTheCat => &[
                "Opening Image",
                "Theme Stated",
                "Set-Up",
                "Catalyst",
                "Debate",
                "Break into Two",
                "B Story",
                "Fun and Games",
                "Midpoint",
                "Bad Guys Close In",
                "All Is Lost",
                "Dark Night of the Soul",
                "Break into Three",
                "Finale",
                "Final Image",
            ],
            Self::Custom => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryBeat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub chapter: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

impl StoryBeat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("beat"),
            name: name.into(),
            description: String::new(),
            notes: String::new(),
            chapter: None,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeStructure {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub framework: NarrativeFramework,
    #[serde(default)]
    pub beats: Vec<StoryBeat>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NarrativeStructure {
    pub fn template(
        project_id: impl Into<String>,
        name: impl Into<String>,
        framework: NarrativeFramework,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            id: generate_id(),
            project_id: project_id.into(),
            name: name.into(),
            framework,
            beats: framework
                .beat_names()
                .iter()
                .map(|name| StoryBeat::new(*name))
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::count(&self.beats, |beat| beat.completed)
    }

    pub fn beat_mut(&mut self, beat_id: &str) -> Option<&mut StoryBeat> {
        self.beats.iter_mut().find(|beat| beat.id == beat_id)
    }
}

impl StoredRecord for NarrativeStructure {
    const KIND: &'static str = "narrative";

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
            issues.push("structure name is required".to_string());
        }
        if self.beats.iter().any(|beat| beat.name.trim().is_empty()) {
            issues.push("every beat needs a name".to_string());
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::{NarrativeFramework, NarrativeStructure};

    #[test]
    fn frameworks_seed_their_beats() {
        let cases = [
            (NarrativeFramework::ThreeAct, 8),
            (NarrativeFramework::HerosJourney, 12),
            (NarrativeFramework::SaveTheCat, 15),
            (NarrativeFramework::Custom, 0),
        ];
        for (framework, expected) in cases {
            let structure = NarrativeStructure::template("p1", "Plan", framework);
            assert_eq!(structure.beats.len(), expected, "{framework:?}");
        }
    }

    #[test]
    fn progress_counts_completed_beats() {
        let mut structure =
            NarrativeStructure::template("p1", "Plan", NarrativeFramework::ThreeAct);
        structure.beats[0].completed = true;
        structure.beats[1].completed = true;
        assert_eq!(structure.progress().percentage, 25);
    }
}
