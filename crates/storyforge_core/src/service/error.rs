//! Error type shared by entity services.

use crate::store::kv::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Save blocked before any write; `issues` are user-facing messages.
    Validation {
        kind: &'static str,
        issues: Vec<String>,
    },
    /// Targeted record does not exist.
    NotFound { kind: &'static str, id: String },
    /// Parent exists but the targeted sub-item does not.
    SubItemNotFound {
        kind: &'static str,
        parent_id: String,
        item: &'static str,
        item_id: String,
    },
    /// An update closure tried to change the record id.
    IdChanged { kind: &'static str, id: String },
    /// Storage medium failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { kind, issues } => {
                write!(f, "invalid {kind}: {}", issues.join("; "))
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::SubItemNotFound {
                kind,
                parent_id,
                item,
                item_id,
            } => write!(f, "{item} {item_id} not found in {kind} {parent_id}"),
            Self::IdChanged { kind, id } => write!(f, "{kind} id is immutable: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl ServiceError {
    pub(crate) fn sub_item(
        kind: &'static str,
        parent_id: &str,
        item: &'static str,
        item_id: &str,
    ) -> Self {
        Self::SubItemNotFound {
            kind,
            parent_id: parent_id.to_string(),
            item,
            item_id: item_id.to_string(),
        }
    }
}
