use super::{DocumentPath, ElementPath, InstancePath};

/// `/d/{documentId}`
#[must_use]
pub fn to_document_path(path: &DocumentPath) -> String {
    format!("/d/{}", path.document_id)
}

/// `/d/{documentId}/{w|v|m}/{instanceId}`
#[must_use]
pub fn to_instance_path(path: &InstancePath) -> String {
    format!(
        "/d/{}/{}/{}",
        path.document_id, path.instance_type, path.instance_id
    )
}

/// `/d/{documentId}/{w|v|m}/{instanceId}/e/{elementId}`
#[must_use]
pub fn to_element_path(path: &ElementPath) -> String {
    format!("{}/e/{}", to_instance_path(&path.instance), path.element_id)
}
