//! Project checklist model and built-in templates.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::model::progress::Progress;
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

/// Built-in starting point for a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistTemplate {
    /// Three categories of five items for a first draft.
    NovelDraft,
    /// Structural, line and proof passes.
    RevisionPass,
    #[default]
    Blank,
}

type CategorySeed = (&'static str, &'static [&'static str]);

const NOVEL_DRAFT: &[CategorySeed] = &[
    (
        "Foundation",
        &[
            "Premise in one sentence",
            "Genre and audience",
            "Theme",
            "Setting outline",
            "Point of view and tense",
        ],
    ),
    (
        "Characters",
        &[
            "Protagonist dossier",
            "Antagonist dossier",
            "Supporting cast list",
            "Character arcs",
            "Relationship map",
        ],
    ),
    (
        "Plot",
        &[
            "Inciting incident",
            "Midpoint",
            "Climax",
            "Resolution",
            "Scene list",
        ],
    ),
];

const REVISION_PASS: &[CategorySeed] = &[
    (
        "Structure",
        &["Stakes escalate", "Subplots resolved", "Pacing check"],
    ),
    (
        "Line",
        &["Dialogue pass", "Cut filter words", "Vary sentence length"],
    ),
    ("Proof", &["Spelling", "Name consistency", "Formatting"]),
];

impl ChecklistTemplate {
    fn categories(self) -> &'static [CategorySeed] {
        match self {
            Self::NovelDraft => NOVEL_DRAFT,
            Self::RevisionPass => REVISION_PASS,
            Self::Blank => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub notes: String,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("item"),
            label: label.into(),
            checked: false,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl ChecklistCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("cat"),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::count(&self.items, |item| item.checked)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectChecklist {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub template: ChecklistTemplate,
    #[serde(default)]
    pub categories: Vec<ChecklistCategory>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProjectChecklist {
    /// Unsaved checklist pre-filled from `template`.
    pub fn from_template(
        project_id: impl Into<String>,
        name: impl Into<String>,
        template: ChecklistTemplate,
    ) -> Self {
        let now = now_epoch_ms();
        let categories = template
            .categories()
            .iter()
            .map(|(category_name, labels)| {
                let mut category = ChecklistCategory::new(*category_name);
                category.items = labels.iter().map(|label| ChecklistItem::new(*label)).collect();
                category
            })
            .collect();

        Self {
            id: generate_id(),
            project_id: project_id.into(),
            name: name.into(),
            template,
            categories,
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress across every category.
    pub fn progress(&self) -> Progress {
        Progress::count(
            self.categories.iter().flat_map(|category| category.items.iter()),
            |item| item.checked,
        )
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }

    pub fn category_mut(&mut self, category_id: &str) -> Option<&mut ChecklistCategory> {
        self.categories
            .iter_mut()
            .find(|category| category.id == category_id)
    }
}

impl StoredRecord for ProjectChecklist {
    const KIND: &'static str = "checklist";

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
            issues.push("checklist name is required".to_string());
        }
        for category in &self.categories {
            if category.name.trim().is_empty() {
                issues.push(format!("category {} has no name", category.id));
            }
            for item in &category.items {
                if item.label.trim().is_empty() {
                    issues.push(format!("item {} has no label", item.id));
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistTemplate, ProjectChecklist};
    use std::collections::HashSet;

    #[test]
    fn novel_draft_template_has_fifteen_unchecked_items() {
        let checklist =
            ProjectChecklist::from_template("p1", "Draft", ChecklistTemplate::NovelDraft);
        assert_eq!(checklist.categories.len(), 3);
        assert_eq!(checklist.items().count(), 15);
        assert!(checklist.items().all(|item| !item.checked));

        let ids: HashSet<_> = checklist.items().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn blank_template_reports_zero_progress() {
        let checklist = ProjectChecklist::from_template("p1", "Empty", ChecklistTemplate::Blank);
        let progress = checklist.progress();
        assert_eq!((progress.total, progress.completed, progress.percentage), (0, 0, 0));
    }

    #[test]
    fn category_progress_is_independent() {
        let mut checklist =
            ProjectChecklist::from_template("p1", "Revise", ChecklistTemplate::RevisionPass);
        for item in checklist.categories[0].items.iter_mut() {
            item.checked = true;
        }
        assert!(checklist.categories[0].progress().is_complete());
        assert_eq!(checklist.categories[1].progress().completed, 0);
        assert_eq!(checklist.progress().percentage, 33);
    }
}
