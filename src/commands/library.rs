use std::collections::BTreeMap;

use doclink::api::ApiClient;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{write_json, CommandError};

pub async fn documents(client: &ApiClient, cancel: &CancellationToken) -> Result<(), CommandError> {
    let result = client.list_documents(cancel).await?;
    write_json(&result)
}

pub async fn configuration(
    client: &ApiClient,
    configuration_id: &str,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let result = client.get_configuration(configuration_id, cancel).await?;
    write_json(&json!({
        "defaultConfiguration": result.default_configuration,
        "defaults": result.default_values(),
        "parameters": result.parameters,
    }))
}

/// Inserts a library element. Configurable elements start from their
/// default values, with `overrides` applied on top.
pub async fn insert(
    client: &ApiClient,
    element_id: &str,
    overrides: Vec<(String, String)>,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let library = client.list_documents(cancel).await?;
    let element = library
        .elements
        .into_iter()
        .find(|element| element.id == element_id)
        .ok_or_else(|| CommandError::ElementNotFound(element_id.to_string()))?;
    let configuration = match &element.configuration_id {
        Some(configuration_id) => {
            let mut values = client
                .get_configuration(configuration_id, cancel)
                .await?
                .default_values();
            values.extend(overrides);
            Some(values)
        }
        None if overrides.is_empty() => None,
        None => Some(overrides.into_iter().collect::<BTreeMap<_, _>>()),
    };
    debug!(element = %element.name, ?configuration, "Inserting library element");
    client
        .insert_element(&element, configuration.as_ref(), cancel)
        .await?;
    write_json(&json!({
        "message": format!("Inserted {}", element.name),
        "element": element,
        "configuration": configuration,
    }))
}
