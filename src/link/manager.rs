use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::{CacheKey, LinkCache, LinkDirection, LinkError, LinkedDocument};
use crate::api::{ApiClient, UpdatedElements};
use crate::errors::ValidationError;
use crate::path::{parse_web_path, InstancePath, DEFAULT_CAD_HOST};
use crate::version::PushVersionArgs;

/// How long a removal can be undone.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// Lets a removed link be restored until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoHandle {
    id: Uuid,
    direction: LinkDirection,
    document: LinkedDocument,
    expires_at: Instant,
}

impl UndoHandle {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn direction(&self) -> LinkDirection {
        self.direction
    }

    #[must_use]
    pub fn document(&self) -> &LinkedDocument {
        &self.document
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Result of removing a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub removed: LinkedDocument,
    pub undo: UndoHandle,
}

/// Result of a version push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushedVersion {
    pub name: String,
    /// Parents whose references were moved to the new version.
    pub targets: Vec<InstancePath>,
    pub updated: UpdatedElements,
}

/// Owns the cached parent and child listings of the session's document and
/// applies every link mutation to them.
#[derive(Debug)]
pub struct LinkManager {
    client: ApiClient,
    cache: Mutex<LinkCache>,
    undo_window: Duration,
    cad_host: String,
}

impl LinkManager {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: Mutex::new(LinkCache::new()),
            undo_window: DEFAULT_UNDO_WINDOW,
            cad_host: DEFAULT_CAD_HOST.to_string(),
        }
    }

    #[must_use]
    pub fn with_undo_window(mut self, undo_window: Duration) -> Self {
        self.undo_window = undo_window;
        self
    }

    #[must_use]
    pub fn with_cad_host(mut self, cad_host: impl Into<String>) -> Self {
        self.cad_host = cad_host.into();
        self
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn cad_host(&self) -> &str {
        &self.cad_host
    }

    /// Fetches the links in `direction` and caches them.
    ///
    /// A cycle among recursively linked documents is reported as
    /// [`LinkError::Cycle`].
    pub async fn fetch_links(
        &self,
        direction: LinkDirection,
        recursive: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<LinkedDocument>, LinkError> {
        let documents = self
            .client
            .fetch_linked_documents(direction, recursive, cancel)
            .await?;
        let revision = self
            .cache
            .lock()
            .await
            .set(CacheKey::new(direction, recursive), documents.clone());
        debug!(%direction, recursive, count = documents.len(), revision, "Cached linked documents");
        Ok(documents)
    }

    /// Cached links, if they were fetched.
    pub async fn links(&self, direction: LinkDirection, recursive: bool) -> Option<Vec<LinkedDocument>> {
        self.cache
            .lock()
            .await
            .get(CacheKey::new(direction, recursive))
            .map(|entry| entry.documents.clone())
    }

    /// Cached links, fetching them on a miss.
    pub async fn links_or_fetch(
        &self,
        direction: LinkDirection,
        recursive: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<LinkedDocument>, LinkError> {
        match self.links(direction, recursive).await {
            Some(documents) => Ok(documents),
            None => self.fetch_links(direction, recursive, cancel).await,
        }
    }

    /// Links `target` in `direction`.
    ///
    /// Targets must be workspaces other than the current one; both are
    /// checked before anything is sent.
    pub async fn add_link(
        &self,
        direction: LinkDirection,
        target: &InstancePath,
        cancel: &CancellationToken,
    ) -> Result<LinkedDocument, LinkError> {
        if self.client.context().is_current_instance(target) {
            return Err(ValidationError::SelfLink.into());
        }
        if !target.instance_type.is_workspace() {
            return Err(ValidationError::NotWorkspace.into());
        }
        let document = self.client.add_linked_document(direction, target, cancel).await?;
        let mut cache = self.cache.lock().await;
        if let Some(revision) = cache.append(CacheKey::new(direction, false), document.clone()) {
            debug!(%direction, revision, "Appended linked document");
        }
        cache.invalidate(CacheKey::new(direction, true));
        Ok(document)
    }

    fn parse_target(&self, url: &str) -> Result<InstancePath, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        parse_web_path(&self.cad_host, url)
            .and_then(|identifier| identifier.instance().cloned())
            .ok_or(ValidationError::UnparseableUrl)
    }

    /// Links the document behind a pasted web URL.
    pub async fn add_link_from_url(
        &self,
        direction: LinkDirection,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<LinkedDocument, LinkError> {
        let target = self.parse_target(url)?;
        self.add_link(direction, &target, cancel).await
    }

    /// Unlinks `target` and returns a handle that can restore it within the
    /// undo window.
    pub async fn remove_link(
        &self,
        direction: LinkDirection,
        target: &InstancePath,
        cancel: &CancellationToken,
    ) -> Result<Removal, LinkError> {
        let removed = self
            .client
            .remove_linked_document(direction, target, cancel)
            .await?;
        {
            let mut cache = self.cache.lock().await;
            cache.remove_matching(CacheKey::new(direction, false), target);
            cache.invalidate(CacheKey::new(direction, true));
        }
        let undo = UndoHandle {
            id: Uuid::new_v4(),
            direction,
            document: removed.clone(),
            expires_at: Instant::now()
                .checked_add(self.undo_window)
                .unwrap_or_else(Instant::now),
        };
        debug!(undo_id = %undo.id, window = %humantime::format_duration(self.undo_window), "Removal can be undone");
        Ok(Removal { removed, undo })
    }

    /// Unlinks the document behind a web URL.
    pub async fn remove_link_from_url(
        &self,
        direction: LinkDirection,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Removal, LinkError> {
        let target = self.parse_target(url)?;
        self.remove_link(direction, &target, cancel).await
    }

    /// Restores a removed link. After the undo window this does nothing and
    /// returns `None`.
    pub async fn undo(
        &self,
        handle: UndoHandle,
        cancel: &CancellationToken,
    ) -> Result<Option<LinkedDocument>, LinkError> {
        let expired = handle.is_expired();
        let UndoHandle {
            id,
            direction,
            document,
            ..
        } = handle;
        if expired {
            debug!(undo_id = %id, "Undo window has passed");
            return Ok(None);
        }
        let restored = self.add_link(direction, document.path(), cancel).await?;
        info!(undo_id = %id, document = %restored.display_name(), "Restored link");
        Ok(Some(restored))
    }

    /// Drops both cached listings of `direction` and fetches the
    /// non-recursive one again.
    pub async fn refresh(
        &self,
        direction: LinkDirection,
        cancel: &CancellationToken,
    ) -> Result<Vec<LinkedDocument>, LinkError> {
        self.cache.lock().await.invalidate_direction(direction);
        self.fetch_links(direction, false, cancel).await
    }

    pub async fn invalidate_all(&self) {
        self.cache.lock().await.clear();
    }

    /// Pushes a version of the current document to every resolved parent.
    ///
    /// With `recursive`, parents of parents are included; a cycle among them
    /// fails with [`LinkError::Cycle`] before the push is sent.
    pub async fn push_version(
        &self,
        name: &str,
        description: &str,
        recursive: bool,
        cancel: &CancellationToken,
    ) -> Result<PushedVersion, LinkError> {
        let parents = self
            .links_or_fetch(LinkDirection::Parents, recursive, cancel)
            .await?;
        let args = PushVersionArgs::from_links(name, description, &parents);
        args.validate()?;
        let updated = self.client.push_version(&args, cancel).await?;
        Ok(PushedVersion {
            name: args.name,
            targets: args.instances_to_update,
            updated,
        })
    }
}
