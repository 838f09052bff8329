//! Document, instance and element identifiers.
//!
//! A document is a collection of instances (workspaces, versions and
//! microversions); an element is a tab inside one instance. Identifiers
//! coming from untyped sources are sorted into [`Identifier`] variants once,
//! by which fields are present.

mod api_path;
mod instance_type;
mod web_url;

pub use api_path::{to_document_path, to_element_path, to_instance_path};
pub use instance_type::InstanceType;
pub use web_url::{parse_web_path, parse_web_url, to_web_url, WebLocation, DEFAULT_CAD_HOST};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Unknown instance type: {0}")]
    UnknownInstanceType(String),
    #[error("Missing documentId")]
    MissingDocumentId,
    #[error("Missing instanceId")]
    MissingInstanceId,
    #[error("An elementId requires an instanceId")]
    ElementWithoutInstance,
}

/// Path to a document, without any instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPath {
    pub document_id: String,
}

impl DocumentPath {
    #[must_use]
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
        }
    }
}

/// Path to a workspace, version or microversion of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstancePath {
    pub document_id: String,
    pub instance_id: String,
    #[serde(default)]
    pub instance_type: InstanceType,
}

impl InstancePath {
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        instance_id: impl Into<String>,
        instance_type: InstanceType,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            instance_id: instance_id.into(),
            instance_type,
        }
    }

    /// Shorthand for a workspace instance.
    #[must_use]
    pub fn workspace(document_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self::new(document_id, instance_id, InstanceType::Workspace)
    }

    #[must_use]
    pub fn document(&self) -> DocumentPath {
        DocumentPath::new(self.document_id.clone())
    }

    /// Links are keyed by document and instance id only.
    #[must_use]
    pub fn same_link_target(&self, other: &Self) -> bool {
        self.document_id == other.document_id && self.instance_id == other.instance_id
    }

    #[must_use]
    pub fn with_element(&self, element_id: impl Into<String>) -> ElementPath {
        ElementPath {
            instance: self.clone(),
            element_id: element_id.into(),
        }
    }
}

/// Path to a tab in a document instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPath {
    #[serde(flatten)]
    pub instance: InstancePath,
    pub element_id: String,
}

impl ElementPath {
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        instance_id: impl Into<String>,
        instance_type: InstanceType,
        element_id: impl Into<String>,
    ) -> Self {
        InstancePath::new(document_id, instance_id, instance_type).with_element(element_id)
    }
}

/// Any of the three identifier kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Document(DocumentPath),
    Instance(InstancePath),
    Element(ElementPath),
}

impl Identifier {
    /// Classifies loose fields into an identifier kind.
    ///
    /// Empty strings count as absent. A missing instance type defaults to a
    /// workspace.
    pub fn from_fields(
        document_id: Option<&str>,
        instance_id: Option<&str>,
        instance_type: Option<&str>,
        element_id: Option<&str>,
    ) -> Result<Self, PathError> {
        fn present(s: Option<&str>) -> Option<&str> {
            s.filter(|v| !v.is_empty())
        }

        let document_id = present(document_id).ok_or(PathError::MissingDocumentId)?;
        let instance_type = match present(instance_type) {
            Some(code) => code.parse()?,
            None => InstanceType::default(),
        };
        match (present(instance_id), present(element_id)) {
            (None, None) => Ok(Self::Document(DocumentPath::new(document_id))),
            (None, Some(_)) => Err(PathError::ElementWithoutInstance),
            (Some(instance_id), None) => Ok(Self::Instance(InstancePath::new(
                document_id,
                instance_id,
                instance_type,
            ))),
            (Some(instance_id), Some(element_id)) => Ok(Self::Element(ElementPath::new(
                document_id,
                instance_id,
                instance_type,
                element_id,
            ))),
        }
    }

    /// Classifies a JSON object such as `{"documentId": .., "instanceId": ..}`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PathError> {
        let field = |name: &str| value.get(name).and_then(serde_json::Value::as_str);
        Self::from_fields(
            field("documentId"),
            field("instanceId"),
            field("instanceType"),
            field("elementId"),
        )
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        match self {
            Self::Document(d) => &d.document_id,
            Self::Instance(i) => &i.document_id,
            Self::Element(e) => &e.instance.document_id,
        }
    }

    #[must_use]
    pub fn instance(&self) -> Option<&InstancePath> {
        match self {
            Self::Document(_) => None,
            Self::Instance(i) => Some(i),
            Self::Element(e) => Some(&e.instance),
        }
    }

    /// The REST path for whichever kind this is.
    #[must_use]
    pub fn api_path(&self) -> String {
        match self {
            Self::Document(d) => to_document_path(d),
            Self::Instance(i) => to_instance_path(i),
            Self::Element(e) => to_element_path(e),
        }
    }
}

impl From<DocumentPath> for Identifier {
    fn from(value: DocumentPath) -> Self {
        Self::Document(value)
    }
}

impl From<InstancePath> for Identifier {
    fn from(value: InstancePath) -> Self {
        Self::Instance(value)
    }
}

impl From<ElementPath> for Identifier {
    fn from(value: ElementPath) -> Self {
        Self::Element(value)
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
