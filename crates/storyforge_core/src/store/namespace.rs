//! Namespace names for store partitions.

use crate::store::kv::{StoreError, StoreResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]{0,63}$").expect("valid namespace regex"));

/// A named partition of the store holding one entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    pub const CHARACTERS: &'static str = "characters";
    pub const CHECKLISTS: &'static str = "checklists";
    pub const SCENES: &'static str = "scenes";
    pub const NARRATIVES: &'static str = "narratives";
    pub const WORLDS: &'static str = "worlds";
    pub const INTERVIEWS: &'static str = "interviews";

    /// Validates and wraps a namespace name.
    ///
    /// Names are lowercase ASCII, start with a letter and are at most 64
    /// characters of `[a-z0-9_-]`.
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        if !NAMESPACE_RE.is_match(&name) {
            return Err(StoreError::InvalidNamespace(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Namespace;
    use crate::store::kv::StoreError;

    #[test]
    fn well_known_names_are_valid() {
        for name in [
            Namespace::CHARACTERS,
            Namespace::CHECKLISTS,
            Namespace::SCENES,
            Namespace::NARRATIVES,
            Namespace::WORLDS,
            Namespace::INTERVIEWS,
        ] {
            assert_eq!(Namespace::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "Characters", "9lives", "has space", "dots.not.ok"] {
            let err = Namespace::new(bad).unwrap_err();
            assert!(matches!(err, StoreError::InvalidNamespace(name) if name == bad));
        }
        assert!(Namespace::new("a".repeat(65)).is_err());
        assert!(Namespace::new("a".repeat(64)).is_ok());
    }
}
