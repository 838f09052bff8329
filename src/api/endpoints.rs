use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::client::ApiClient;
use super::transport::ApiRequest;
use super::types::{
    ConfigurationResult, DefaultName, DefaultNameKind, DocumentResult, ElementObj, ElementType,
    GeneratedAssembly, PushVersionBody, UpdatedElements,
};
use crate::errors::{ApiError, ValidationError};
use crate::link::{LinkDirection, LinkedDocument};
use crate::path::{to_element_path, ElementPath, InstancePath};
use crate::version::PushVersionArgs;

/// Body of a linked-documents listing. Older backends wrap the list in an
/// object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkedDocumentsResponse {
    List(Vec<LinkedDocument>),
    Wrapped { documents: Vec<LinkedDocument> },
}

impl LinkedDocumentsResponse {
    #[must_use]
    pub fn into_documents(self) -> Vec<LinkedDocument> {
        match self {
            Self::List(documents) | Self::Wrapped { documents } => documents,
        }
    }
}

impl ApiClient {
    fn linked_documents_route(&self, direction: LinkDirection) -> String {
        format!(
            "/linked-documents/{}{}",
            direction.as_str(),
            self.context().instance_api_path()
        )
    }

    fn link_target_request(request: ApiRequest, target: &InstancePath) -> ApiRequest {
        request
            .query("documentId", target.document_id.clone())
            .query("instanceId", target.instance_id.clone())
    }

    pub async fn fetch_linked_documents(
        &self,
        direction: LinkDirection,
        recursive: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<LinkedDocument>, ApiError> {
        let request = ApiRequest::get(self.linked_documents_route(direction))
            .query("recursive", recursive.to_string());
        let response: LinkedDocumentsResponse = self.execute(request, cancel).await?;
        Ok(response.into_documents())
    }

    pub async fn add_linked_document(
        &self,
        direction: LinkDirection,
        target: &InstancePath,
        cancel: &CancellationToken,
    ) -> Result<LinkedDocument, ApiError> {
        let request =
            Self::link_target_request(ApiRequest::post(self.linked_documents_route(direction)), target);
        let document: LinkedDocument = self.execute(request, cancel).await?;
        info!(%direction, document_id = %target.document_id, "Linked document");
        Ok(document)
    }

    pub async fn remove_linked_document(
        &self,
        direction: LinkDirection,
        target: &InstancePath,
        cancel: &CancellationToken,
    ) -> Result<LinkedDocument, ApiError> {
        let request = Self::link_target_request(
            ApiRequest::delete(self.linked_documents_route(direction)),
            target,
        );
        let document: LinkedDocument = self.execute(request, cancel).await?;
        info!(%direction, document_id = %target.document_id, "Unlinked document");
        Ok(document)
    }

    /// Creates a version of the current document and moves the references
    /// in `args.instances_to_update` to it.
    pub async fn push_version(
        &self,
        args: &PushVersionArgs,
        cancel: &CancellationToken,
    ) -> Result<UpdatedElements, ApiError> {
        args.validate()?;
        let body = PushVersionBody {
            name: &args.name,
            description: &args.description,
            instances_to_update: &args.instances_to_update,
        };
        let request = ApiRequest::post(format!(
            "/push-version{}",
            self.context().instance_api_path()
        ))
        .json(serde_json::to_value(body)?);
        let result: UpdatedElements = self.execute(request, cancel).await?;
        info!(
            name = %args.name,
            updated = result.updated_elements,
            "Pushed version"
        );
        Ok(result)
    }

    /// Updates references in the current document to the latest versions of
    /// its children. An empty `children` updates every child.
    pub async fn update_references(
        &self,
        children: &[InstancePath],
        cancel: &CancellationToken,
    ) -> Result<UpdatedElements, ApiError> {
        let mut request = ApiRequest::post(format!(
            "/update-references{}",
            self.context().instance_api_path()
        ));
        if !children.is_empty() {
            request = request.json(json!({ "childDocumentIds": children }));
        }
        let result: UpdatedElements = self.execute(request, cancel).await?;
        info!(updated = result.updated_elements, "Updated references");
        Ok(result)
    }

    /// Generates an assembly from the current part studio and returns the
    /// path of the new tab.
    pub async fn generate_assembly(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ElementPath, ApiError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let element = self.context().element()?;
        let request = ApiRequest::post(format!("/generate-assembly{}", to_element_path(&element)))
            .json(json!({ "name": name }));
        let result: GeneratedAssembly = self.execute(request, cancel).await?;
        info!(%name, element_id = %result.element_id, "Generated assembly");
        Ok(element.instance.with_element(result.element_id))
    }

    pub async fn default_name(
        &self,
        kind: DefaultNameKind,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let request = ApiRequest::get(format!(
            "/default-name/{}{}",
            kind.route_segment(),
            self.context().instance_api_path()
        ));
        let result: DefaultName = self.execute(request, cancel).await?;
        Ok(result.name)
    }

    pub async fn list_documents(
        &self,
        cancel: &CancellationToken,
    ) -> Result<DocumentResult, ApiError> {
        self.execute(ApiRequest::get("/documents"), cancel).await
    }

    pub async fn get_configuration(
        &self,
        configuration_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ConfigurationResult, ApiError> {
        self.execute(
            ApiRequest::get(format!("/configuration/{configuration_id}")),
            cancel,
        )
        .await
    }

    /// Inserts a library element into the current tab.
    ///
    /// The route depends on the kind of tab the session was opened from;
    /// part studios are assumed when it is unknown.
    pub async fn insert_element(
        &self,
        element: &ElementObj,
        configuration: Option<&BTreeMap<String, String>>,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        let target = self.context().element_api_path()?;
        let route = self
            .context()
            .element_type()
            .unwrap_or(ElementType::PartStudio)
            .insert_route();
        let mut body = serde_json::to_value(element)?;
        if let (Some(configuration), Some(object)) = (configuration, body.as_object_mut()) {
            object.insert("configuration".to_string(), json!(configuration));
        }
        let request = ApiRequest::post(format!("{route}{target}")).json(body);
        let IgnoredAny = self.execute(request, cancel).await?;
        info!(element = %element.name, %route, "Inserted element");
        Ok(())
    }
}
