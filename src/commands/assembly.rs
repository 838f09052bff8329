use doclink::api::{ApiClient, DefaultNameKind};
use doclink::path::{to_web_url, Identifier};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{write_json, CommandError, Settings};

pub async fn generate(
    client: &ApiClient,
    settings: &Settings,
    name: Option<String>,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let name = match name {
        Some(name) => name,
        None => client.default_name(DefaultNameKind::Assembly, cancel).await?,
    };
    let element = client.generate_assembly(&name, cancel).await?;
    let url = to_web_url(&settings.cad_host, &Identifier::Element(element.clone()));
    write_json(&json!({
        "message": format!("Generated {name}"),
        "element": element,
        "url": url,
    }))
}
