//! Core configuration loaded from TOML.
//!
//! Every key is optional; missing keys take the `Default` values.
//!
//! ```toml
//! database_path = "/home/me/.storyforge/store.sqlite3"
//! log_level = "info"
//! log_dir = "/home/me/.storyforge/logs"
//!
//! [scoring]
//! penalty_per_issue = 10
//! min_personality_traits = 3
//! ```

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Thresholds used by consistency rules.
///
/// These are tuning knobs, not semantics: changing them only moves scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points removed per failed rule.
    pub penalty_per_issue: u8,
    pub min_personality_traits: usize,
    pub min_relationships: usize,
    pub min_scene_beats: usize,
    pub min_characters_present: usize,
    pub min_world_locations: usize,
    pub min_world_cultures: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty_per_issue: 10,
            min_personality_traits: 3,
            min_relationships: 1,
            min_scene_beats: 3,
            min_characters_present: 1,
            min_world_locations: 2,
            min_world_cultures: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file. `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling logs. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub scoring: ScoringConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            scoring: ScoringConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Opens the configured store, in memory when no path is set.
    pub fn open_store(&self) -> DbResult<Connection> {
        match &self.database_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Starts file logging when `log_dir` is set; otherwise does nothing.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, &dir.to_string_lossy()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ScoringConfig};
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.scoring.penalty_per_issue, 10);
    }

    #[test]
    fn partial_scoring_table_keeps_other_defaults() {
        let config = CoreConfig::from_toml_str(
            r#"
            database_path = "/tmp/store.sqlite3"
            log_level = "warn"

            [scoring]
            penalty_per_issue = 25
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/tmp/store.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.scoring.penalty_per_issue, 25);
        assert_eq!(
            config.scoring.min_personality_traits,
            ScoringConfig::default().min_personality_traits
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CoreConfig::from_toml_str("scoring = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CoreConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn open_store_without_path_is_in_memory() {
        let conn = CoreConfig::default().open_store().unwrap();
        assert!(conn.path().map_or(true, |path| path.is_empty()));
    }
}
