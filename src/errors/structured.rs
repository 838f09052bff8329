use std::fmt::Display;

use serde::Serialize;

use super::{ApiError, ReportedError, TransportError, ValidationError};
use crate::link::LinkError;
use crate::logging::get_log_file_path;
use crate::user_config::UserConfigError;
use crate::utils::format_display_path;

/// Maps a domain error to a stable code and an optional hint for the user.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub code: String,
}

#[derive(Serialize)]
pub struct StructuredError {
    pub operation: String,
    pub logs: String,
    pub messages: Vec<ErrorMessage>,
}

impl StructuredError {
    #[must_use]
    pub fn new(operation: &str, code: &str, message: String) -> Self {
        Self {
            operation: operation.to_string(),
            logs: format_display_path(get_log_file_path()),
            messages: vec![ErrorMessage {
                message,
                tip: None,
                code: code.to_string(),
            }],
        }
    }

    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        if let Some(msg) = self.messages.first_mut() {
            msg.tip = Some(tip.to_string());
        }
        self
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"operation":"","logs":"","messages":[{"message":"serialization error","code":"INTERNAL_ERROR"}]}"#.to_string()
        })
    }
}

/// Converts a domain error into a structured JSON error string.
pub fn to_error_json<E: ToStructuredError + Display>(operation: &str, err: &E) -> String {
    let (code, tip) = err.error_code_and_tip();
    let mut se = StructuredError::new(operation, code, err.to_string());
    if let Some(tip) = tip {
        se = se.with_tip(tip);
    }
    se.to_json()
}

const TIP_MANAGE_LINKS: &str = "Run 'doclink links list' to review the linked documents";
const TIP_SUPPORT: &str = "If the problem persists, contact support and include the log file";

impl ToStructuredError for ValidationError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::EmptyUrl | Self::UnparseableUrl => (
                "INVALID_URL",
                Some("Copy the link from the browser address bar of the document"),
            ),
            Self::SelfLink => ("SELF_LINK", None),
            Self::NotWorkspace => (
                "NOT_WORKSPACE",
                Some("Open the main workspace of the document and copy its link"),
            ),
            Self::InvalidVersionName { .. } => ("INVALID_VERSION_NAME", None),
            Self::DescriptionTooLong { .. } => ("DESCRIPTION_TOO_LONG", None),
            Self::NoPushTargets => ("NO_PUSH_TARGETS", Some(TIP_MANAGE_LINKS)),
            Self::EmptyName => ("EMPTY_NAME", None),
            Self::MissingElement => ("MISSING_ELEMENT", Some("Pass --element-id or a tab URL")),
        }
    }
}

impl ToStructuredError for ReportedError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::MissingPermission { .. } => (
                "MISSING_PERMISSION",
                Some("Ask the document owner to share it with the needed permission"),
            ),
            Self::LinkedCycle => ("LINKED_CYCLE", Some(TIP_MANAGE_LINKS)),
            Self::Generic { .. } => ("REJECTED", None),
        }
    }
}

impl ToStructuredError for TransportError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        ("TRANSPORT_ERROR", Some("Check that the backend is reachable (--api-url)"))
    }
}

impl ToStructuredError for ApiError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::Validation(e) => e.error_code_and_tip(),
            Self::Reported(e) => e.error_code_and_tip(),
            Self::Transport(e) => e.error_code_and_tip(),
            Self::Status { .. } => ("REQUEST_FAILED", Some(TIP_SUPPORT)),
            Self::Decode(_) => ("DECODE_ERROR", Some(TIP_SUPPORT)),
            Self::Cancelled => ("CANCELLED", None),
        }
    }
}

impl ToStructuredError for LinkError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::Validation(e) => e.error_code_and_tip(),
            Self::Cycle => ("LINKED_CYCLE", Some(TIP_MANAGE_LINKS)),
            Self::Api(e) => e.error_code_and_tip(),
        }
    }
}

impl ToStructuredError for UserConfigError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::Io(_) => ("CONFIG_IO_ERROR", None),
            Self::Toml(_) => ("CONFIG_PARSE_ERROR", Some("Fix or remove ~/.doclink/config.toml")),
        }
    }
}
