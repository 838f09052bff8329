use serde::{Deserialize, Serialize};

use crate::path::{InstancePath, InstanceType};

/// Linked document as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedDocumentRecord {
    pub document_id: String,
    #[serde(alias = "workspaceId")]
    pub instance_id: String,
    #[serde(default)]
    pub instance_type: InstanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_openable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "workspaceName", skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
}

/// A linked document whose metadata the backend could read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub instance: InstancePath,
    pub name: String,
    pub instance_name: String,
}

/// A linked document, sorted by whether it can be opened.
///
/// Unresolved links point at documents that were deleted or are not shared
/// with the user; only their identity is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LinkedDocumentRecord", into = "LinkedDocumentRecord")]
pub enum LinkedDocument {
    Resolved(ResolvedLink),
    Unresolved(InstancePath),
}

impl LinkedDocument {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub fn as_resolved(&self) -> Option<&ResolvedLink> {
        match self {
            Self::Resolved(link) => Some(link),
            Self::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &InstancePath {
        match self {
            Self::Resolved(link) => &link.instance,
            Self::Unresolved(path) => path,
        }
    }

    /// Whether this link points at `target`, ignoring the instance type.
    #[must_use]
    pub fn matches(&self, target: &InstancePath) -> bool {
        self.path().same_link_target(target)
    }

    /// Name to show for the link; unresolved links fall back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(link) => &link.name,
            Self::Unresolved(path) => &path.document_id,
        }
    }
}

impl From<LinkedDocumentRecord> for LinkedDocument {
    fn from(record: LinkedDocumentRecord) -> Self {
        let instance = InstancePath::new(record.document_id, record.instance_id, record.instance_type);
        match (record.is_openable.unwrap_or(true), record.name) {
            (true, Some(name)) => Self::Resolved(ResolvedLink {
                instance,
                name,
                instance_name: record.instance_name.unwrap_or_default(),
            }),
            _ => Self::Unresolved(instance),
        }
    }
}

impl From<LinkedDocument> for LinkedDocumentRecord {
    fn from(document: LinkedDocument) -> Self {
        match document {
            LinkedDocument::Resolved(link) => Self {
                document_id: link.instance.document_id,
                instance_id: link.instance.instance_id,
                instance_type: link.instance.instance_type,
                is_openable: Some(true),
                name: Some(link.name),
                instance_name: Some(link.instance_name),
            },
            LinkedDocument::Unresolved(path) => Self {
                document_id: path.document_id,
                instance_id: path.instance_id,
                instance_type: path.instance_type,
                is_openable: Some(false),
                name: None,
                instance_name: None,
            },
        }
    }
}

/// The resolved links in `documents`, in order.
pub fn resolved(documents: &[LinkedDocument]) -> impl Iterator<Item = &ResolvedLink> {
    documents.iter().filter_map(LinkedDocument::as_resolved)
}

#[must_use]
pub fn all_resolved(documents: &[LinkedDocument]) -> bool {
    documents.iter().all(LinkedDocument::is_resolved)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
