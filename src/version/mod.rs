//! Validation shared by every operation that creates a version.

use crate::errors::ValidationError;
use crate::link::{resolved, LinkedDocument};
use crate::path::InstancePath;

pub const MAX_VERSION_NAME_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// A version name must be present, non-empty and at most
/// [`MAX_VERSION_NAME_LENGTH`] UTF-16 code units, the unit the backend
/// measures in.
#[must_use]
pub fn is_version_name_valid(name: Option<&str>) -> bool {
    match name {
        None | Some("") => false,
        Some(name) => name.encode_utf16().count() <= MAX_VERSION_NAME_LENGTH,
    }
}

/// Descriptions are measured in UTF-16 code units too.
#[must_use]
pub fn is_version_description_valid(description: &str) -> bool {
    description.encode_utf16().count() <= MAX_DESCRIPTION_LENGTH
}

/// Input of a push-version request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushVersionArgs {
    pub name: String,
    pub description: String,
    /// Parent instances whose references move to the new version.
    pub instances_to_update: Vec<InstancePath>,
}

impl PushVersionArgs {
    /// Targets every resolved link in `parents`. Unresolved links can't be
    /// updated and are skipped.
    #[must_use]
    pub fn from_links(name: &str, description: &str, parents: &[LinkedDocument]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            instances_to_update: resolved(parents).map(|link| link.instance.clone()).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_version_name_valid(Some(&self.name)) {
            return Err(ValidationError::InvalidVersionName {
                max: MAX_VERSION_NAME_LENGTH,
            });
        }
        if !is_version_description_valid(&self.description) {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LENGTH,
            });
        }
        if self.instances_to_update.is_empty() {
            return Err(ValidationError::NoPushTargets);
        }
        Ok(())
    }
}

/// Message shown after a push, e.g. "Successfully updated references in 2
/// documents."
#[must_use]
pub fn success_description(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Successfully updated references in {count} document{plural}.")
}

/// Message shown after updating references to children.
#[must_use]
pub fn update_references_message(updated_elements: u32) -> String {
    if updated_elements > 0 {
        format!("Successfully updated outdated references in {updated_elements} tabs")
    } else {
        "No outdated references were found".to_string()
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
