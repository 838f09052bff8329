use doclink::api::{ApiClient, DefaultNameKind};
use doclink::link::LinkManager;
use doclink::path::parse_web_path;
use doclink::version::{success_description, update_references_message};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{write_json, CommandError, Settings};

pub async fn push_version(
    manager: &LinkManager,
    name: Option<String>,
    description: &str,
    recursive: bool,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let name = match name {
        Some(name) => name,
        None => {
            manager
                .client()
                .default_name(DefaultNameKind::Version, cancel)
                .await?
        }
    };
    let pushed = manager.push_version(&name, description, recursive, cancel).await?;
    write_json(&json!({
        "message": "Successfully pushed version",
        "description": success_description(pushed.targets.len()),
        "name": pushed.name,
        "targets": pushed.targets,
        "updatedElements": pushed.updated.updated_elements,
    }))
}

pub async fn update_references(
    client: &ApiClient,
    settings: &Settings,
    children: &[String],
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let children = children
        .iter()
        .map(|url| {
            parse_web_path(&settings.cad_host, url)
                .and_then(|identifier| identifier.instance().cloned())
                .ok_or(CommandError::InvalidUrl)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let result = client.update_references(&children, cancel).await?;
    write_json(&json!({
        "message": update_references_message(result.updated_elements),
        "updatedElements": result.updated_elements,
    }))
}

pub async fn default_name(
    client: &ApiClient,
    kind: DefaultNameKind,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let name = client.default_name(kind, cancel).await?;
    write_json(&json!({ "name": name }))
}
