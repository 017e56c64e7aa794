//! Rule-based consistency scoring.
//!
//! A score starts at 100 and loses `ScoringConfig::penalty_per_issue` for
//! every rule whose check fails, floored at 0. Scores are derived on read
//! and never persisted.

use crate::config::ScoringConfig;

/// One heuristic check over an entity.
pub struct ConsistencyRule<T> {
    /// Stable machine-readable code, e.g. `missing_name`.
    pub code: &'static str,
    /// Message shown to the writer when the check fails.
    pub message: String,
    /// Returns `true` when the entity passes.
    pub check: Box<dyn Fn(&T) -> bool>,
}

impl<T> ConsistencyRule<T> {
    pub fn new(
        code: &'static str,
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            check: Box::new(check),
        }
    }
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyIssue {
    pub code: &'static str,
    pub message: String,
}

/// Outcome of running a rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// 0..=100.
    pub score: u8,
    pub issues: Vec<ConsistencyIssue>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs every rule against `entity`.
pub fn evaluate<T>(
    rules: &[ConsistencyRule<T>],
    entity: &T,
    scoring: &ScoringConfig,
) -> ConsistencyReport {
    let issues: Vec<ConsistencyIssue> = rules
        .iter()
        .filter(|rule| !(rule.check)(entity))
        .map(|rule| ConsistencyIssue {
            code: rule.code,
            message: rule.message.clone(),
        })
        .collect();

    let penalty = u32::from(scoring.penalty_per_issue).saturating_mul(issues.len() as u32);
    let score = 100u32.saturating_sub(penalty) as u8;

    ConsistencyReport { score, issues }
}

/// `true` when the trimmed text is non-empty.
pub(crate) fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}
