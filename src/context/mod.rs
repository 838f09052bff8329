//! The document, instance and tab the session was opened from.
//!
//! The CAD host launches the app with `documentId`, `instanceId`,
//! `instanceType`, `elementId` and `elementType` query parameters. Every
//! operation that needs "the current document" receives a [`SessionContext`]
//! built from them.

use crate::api::ElementType;
use crate::errors::ValidationError;
use crate::path::{
    to_element_path, to_instance_path, ElementPath, Identifier, InstancePath, PathError,
    WebLocation,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    instance: InstancePath,
    element_id: Option<String>,
    element_type: Option<ElementType>,
}

impl SessionContext {
    #[must_use]
    pub fn new(instance: InstancePath) -> Self {
        Self {
            instance,
            element_id: None,
            element_type: None,
        }
    }

    #[must_use]
    pub fn with_element(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    #[must_use]
    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    /// Builds the context from launch query parameters.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut document_id = None;
        let mut instance_id = None;
        let mut instance_type = None;
        let mut element_id = None;
        let mut element_type = None;
        for (key, value) in pairs {
            match key {
                "documentId" => document_id = Some(value),
                "instanceId" | "workspaceId" => instance_id = Some(value),
                "instanceType" | "workspaceOrVersion" => instance_type = Some(value),
                "elementId" => element_id = Some(value),
                "elementType" => element_type = value.parse().ok(),
                _ => {}
            }
        }
        let identifier = Identifier::from_fields(document_id, instance_id, instance_type, element_id)?;
        let mut context = match identifier {
            Identifier::Document(_) => return Err(PathError::MissingInstanceId),
            Identifier::Instance(instance) => Self::new(instance),
            Identifier::Element(element) => Self::from(element),
        };
        context.element_type = element_type;
        Ok(context)
    }

    /// Builds the context from a raw query string such as
    /// `documentId=..&instanceId=..&elementId=..`.
    pub fn from_query_string(query: &str) -> Result<Self, PathError> {
        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();
        Self::from_query_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    #[must_use]
    pub fn instance(&self) -> &InstancePath {
        &self.instance
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.instance.document_id
    }

    #[must_use]
    pub fn element_type(&self) -> Option<ElementType> {
        self.element_type
    }

    pub fn element(&self) -> Result<ElementPath, ValidationError> {
        self.element_id
            .as_ref()
            .map(|id| self.instance.with_element(id.clone()))
            .ok_or(ValidationError::MissingElement)
    }

    #[must_use]
    pub fn instance_api_path(&self) -> String {
        to_instance_path(&self.instance)
    }

    pub fn element_api_path(&self) -> Result<String, ValidationError> {
        self.element().map(|element| to_element_path(&element))
    }

    /// Whether `target` is the instance this session is open in, by
    /// document and instance id.
    #[must_use]
    pub fn is_current_instance(&self, target: &InstancePath) -> bool {
        self.instance.same_link_target(target)
    }
}

impl From<ElementPath> for SessionContext {
    fn from(element: ElementPath) -> Self {
        Self::new(element.instance).with_element(element.element_id)
    }
}

impl From<WebLocation> for SessionContext {
    fn from(location: WebLocation) -> Self {
        Self::from(location.element)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
