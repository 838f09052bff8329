//! Parent and child links of the current document.

mod cache;
mod document;
mod manager;

pub use cache::{CacheEntry, CacheKey, LinkCache};
pub use document::{all_resolved, resolved, LinkedDocument, LinkedDocumentRecord, ResolvedLink};
pub use manager::{LinkManager, PushedVersion, Removal, UndoHandle, DEFAULT_UNDO_WINDOW};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{ApiError, ReportedError, ValidationError};

/// Which side of the current document a link is on.
///
/// Parents consume the current document; children are consumed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Parents,
    Children,
}

impl LinkDirection {
    pub const ALL: [Self; 2] = [Self::Parents, Self::Children];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parents => "parents",
            Self::Children => "children",
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Parents => Self::Children,
            Self::Children => Self::Parents,
        }
    }
}

impl std::str::FromStr for LinkDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parents" | "parent" => Ok(Self::Parents),
            "children" | "child" => Ok(Self::Children),
            _ => Err(format!("Invalid link direction: {s}")),
        }
    }
}

impl std::fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum LinkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Linked documents form a cycle.")]
    Cycle,
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for LinkError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(e) => Self::Validation(e),
            ApiError::Reported(ReportedError::LinkedCycle) => Self::Cycle,
            other => Self::Api(other),
        }
    }
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
