//! Error types shared by the client, the link manager and the CLI.

mod reported;
mod structured;

pub use reported::{ErrorBody, ReportedError, UNKNOWN_ACCESS_MESSAGE};
pub use structured::{to_error_json, ErrorMessage, StructuredError, ToStructuredError};

use http::StatusCode;
use thiserror::Error;

/// Input rejected on the client before any request is sent.
///
/// The message is shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a valid document link.")]
    EmptyUrl,
    #[error("Failed to parse the entered link. Is it a valid document link?")]
    UnparseableUrl,
    #[error("A document can't be linked to itself!")]
    SelfLink,
    #[error("Only workspaces can be linked, not versions or microversions.")]
    NotWorkspace,
    #[error("Version names must be between 1 and {max} characters.")]
    InvalidVersionName { max: usize },
    #[error("Version descriptions must be at most {max} characters.")]
    DescriptionTooLong { max: usize },
    #[error("There are no linked documents to push to.")]
    NoPushTargets,
    #[error("A name is required.")]
    EmptyName,
    #[error("This operation must be run from inside a tab.")]
    MissingElement,
}

/// Failure below the HTTP status level.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Everything a backend call can fail with.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Reported(#[from] ReportedError),
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("Backend responded with {status}")]
    Status { status: StatusCode, body: String },
    #[error("Unexpected response from backend: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    /// Errors the backend reported on purpose, or that the client raised
    /// itself. These are never worth repeating.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Reported(_))
    }

    #[must_use]
    pub fn as_reported(&self) -> Option<&ReportedError> {
        match self {
            Self::Reported(reported) => Some(reported),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
