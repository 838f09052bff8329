use serde::Deserialize;
use thiserror::Error;

/// Fallback shown when the inaccessible document is neither the current one
/// nor known by name.
pub const UNKNOWN_ACCESS_MESSAGE: &str = "You don't have access to a needed document.";

const MISSING_PERMISSION: &str = "MISSING_PERMISSION";
const LINKED_CYCLE: &str = "LINKED_CYCLE";
const CLIENT_EXCEPTION: &str = "CLIENT_EXCEPTION";
const USER_EXCEPTION: &str = "USER_EXCEPTION";

/// JSON body the backend sends with a failed response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A backend rejection the client knows how to present.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportedError {
    #[error("{}", missing_permission_message(.permission, .is_current_document, .document_name))]
    MissingPermission {
        /// Display form, e.g. `Write` or `Link document`.
        permission: String,
        is_current_document: bool,
        document_name: Option<String>,
    },
    #[error("Linked documents form a cycle.")]
    LinkedCycle,
    #[error("{}", .message.as_deref().unwrap_or("The request was rejected."))]
    Generic {
        kind: String,
        message: Option<String>,
    },
}

impl ReportedError {
    /// Maps a backend error body to a reported error.
    ///
    /// Returns `None` for bodies that are not objects, lack a `type`, or carry
    /// a type the client has no special handling for.
    #[must_use]
    pub fn classify(body: &serde_json::Value, current_document_id: &str) -> Option<Self> {
        let body = ErrorBody::deserialize(body).ok()?;
        Self::from_body(body, current_document_id)
    }

    #[must_use]
    pub fn from_body(body: ErrorBody, current_document_id: &str) -> Option<Self> {
        match body.kind.as_str() {
            MISSING_PERMISSION => {
                let is_current_document = match &body.document_id {
                    Some(id) => id == current_document_id,
                    None => body.document_name.is_none(),
                };
                Some(Self::MissingPermission {
                    permission: display_permission(body.permission.as_deref().unwrap_or("Read")),
                    is_current_document,
                    document_name: body.document_name,
                })
            }
            LINKED_CYCLE => Some(Self::LinkedCycle),
            CLIENT_EXCEPTION | USER_EXCEPTION => Some(Self::Generic {
                kind: body.kind,
                message: body.message,
            }),
            _ => None,
        }
    }

    /// Description of a missing permission, falling back to
    /// `unknown_access_message` when the document can't be named.
    #[must_use]
    pub fn description(&self, unknown_access_message: Option<&str>) -> String {
        match self {
            Self::MissingPermission {
                permission,
                is_current_document,
                document_name,
            } => permission_description(
                permission,
                *is_current_document,
                document_name.as_deref(),
                unknown_access_message,
            ),
            other => other.to_string(),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn missing_permission_message(
    permission: &str,
    is_current_document: &bool,
    document_name: &Option<String>,
) -> String {
    permission_description(permission, *is_current_document, document_name.as_deref(), None)
}

fn permission_description(
    permission: &str,
    is_current_document: bool,
    document_name: Option<&str>,
    unknown_access_message: Option<&str>,
) -> String {
    if is_current_document {
        format!("You need to have {permission} access to this document.")
    } else if let Some(name) = document_name {
        format!("You need to have {permission} access to {name}.")
    } else {
        unknown_access_message
            .unwrap_or(UNKNOWN_ACCESS_MESSAGE)
            .to_string()
    }
}

/// `LINK` reads as "Link document" to match the sharing dialog; everything
/// else is capitalized (`WRITE` -> `Write`).
fn display_permission(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("LINK") {
        return "Link document".to_string();
    }
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
