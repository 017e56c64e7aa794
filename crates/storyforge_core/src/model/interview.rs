//! Character interview session model.

use crate::id::{generate_id, generate_prefixed_id, now_epoch_ms};
use crate::model::progress::Progress;
use crate::store::record::StoredRecord;
use serde::{Deserialize, Serialize};

/// Session state. The caller sets it directly; any transition is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    InProgress,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub prompt: String,
    #[serde(default)]
    pub answer: String,
}

impl InterviewQuestion {
    pub fn new(category: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: generate_prefixed_id("q"),
            category: category.into(),
            prompt: prompt.into(),
            answer: String::new(),
        }
    }

    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// Starter question set as `(category, prompt)` pairs.
pub const DEFAULT_QUESTIONS: &[(&str, &str)] = &[
    ("background", "Where did you grow up?"),
    ("background", "Who raised you?"),
    ("motivation", "What do you want more than anything?"),
    ("motivation", "What are you afraid of losing?"),
    ("relationships", "Who do you trust most?"),
    ("relationships", "Who has betrayed you?"),
    ("secrets", "What have you never told anyone?"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: String,
    pub project_id: String,
    pub character_id: String,
    #[serde(default)]
    pub questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub status: InterviewStatus,
    /// Index of the question the writer is currently on.
    #[serde(default)]
    pub current_index: usize,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InterviewSession {
    pub fn template<'a>(
        project_id: impl Into<String>,
        character_id: impl Into<String>,
        questions: impl IntoIterator<Item = &'a (&'a str, &'a str)>,
    ) -> Self {
        let now = now_epoch_ms();
        Self {
            id: generate_id(),
            project_id: project_id.into(),
            character_id: character_id.into(),
            questions: questions
                .into_iter()
                .map(|(category, prompt)| InterviewQuestion::new(*category, *prompt))
                .collect(),
            status: InterviewStatus::InProgress,
            current_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::count(&self.questions, InterviewQuestion::is_answered)
    }
}

impl StoredRecord for InterviewSession {
    const KIND: &'static str = "interview";

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
        if self.character_id.trim().is_empty() {
            issues.push("interview must target a character".to_string());
        }
        if self.current_index > self.questions.len() {
            issues.push(format!(
                "current question {} is past the last question {}",
                self.current_index,
                self.questions.len()
            ));
        }
        issues
    }
}
