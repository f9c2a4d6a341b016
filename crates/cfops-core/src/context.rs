// ── Targeted organization / space ──
//
// The organization and space GUIDs are looked up by name the first time an
// operation needs them and memoized for the life of the `Context`. The
// cells are `tokio::sync::OnceCell`, so concurrent first callers share one
// lookup; a failed lookup leaves the cell empty and the next caller retries.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use cfops_api::CloudControllerClient;
use cfops_api::request_pages;
use cfops_api::v2::ListQuery;

use crate::error::{ContextScope, CoreError};
use crate::resolve::{NameResolution, resolve_by_name};

pub struct Context {
    client: Arc<CloudControllerClient>,
    organization: Option<String>,
    space: Option<String>,
    mode: NameResolution,
    organization_id: OnceCell<String>,
    space_id: OnceCell<String>,
}

impl Context {
    /// Target an organization and space by name. Nothing is requested until
    /// the first call to [`organization_id`](Self::organization_id) or
    /// [`space_id`](Self::space_id).
    pub fn new(
        client: Arc<CloudControllerClient>,
        organization: Option<String>,
        space: Option<String>,
        mode: NameResolution,
    ) -> Self {
        Self {
            client,
            organization,
            space,
            mode,
            organization_id: OnceCell::new(),
            space_id: OnceCell::new(),
        }
    }

    /// Target already-known GUIDs; no name lookups will be made for them.
    pub fn resolved(
        client: Arc<CloudControllerClient>,
        organization_id: Option<String>,
        space_id: Option<String>,
    ) -> Self {
        Self {
            client,
            organization: None,
            space: None,
            mode: NameResolution::default(),
            organization_id: OnceCell::new_with(organization_id),
            space_id: OnceCell::new_with(space_id),
        }
    }

    pub fn client(&self) -> &Arc<CloudControllerClient> {
        &self.client
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn space_name(&self) -> Option<&str> {
        self.space.as_deref()
    }

    /// GUID of the targeted organization.
    pub async fn organization_id(&self) -> Result<&str, CoreError> {
        self.organization_id
            .get_or_try_init(|| async {
                let name = self
                    .organization
                    .as_deref()
                    .ok_or(CoreError::MissingContext {
                        scope: ContextScope::Organization,
                    })?;
                let query = ListQuery::new().filter("name", name);
                let org = resolve_by_name(
                    request_pages(|page| self.client.list_organizations(&query, page)),
                    name,
                    "Organization",
                    self.mode,
                )
                .await?;
                debug!(organization = name, guid = org.id(), "resolved organization");
                Ok::<_, CoreError>(org.metadata.guid)
            })
            .await
            .map(String::as_str)
    }

    /// GUID of the targeted space, looked up inside the targeted
    /// organization.
    pub async fn space_id(&self) -> Result<&str, CoreError> {
        self.space_id
            .get_or_try_init(|| async {
                let name = self.space.as_deref().ok_or(CoreError::MissingContext {
                    scope: ContextScope::Space,
                })?;
                let organization_id = self.organization_id().await?;
                let query = ListQuery::new()
                    .filter("name", name)
                    .filter("organization_guid", organization_id);
                let space = resolve_by_name(
                    request_pages(|page| self.client.list_spaces(&query, page)),
                    name,
                    "Space",
                    self.mode,
                )
                .await?;
                debug!(space = name, guid = space.id(), "resolved space");
                Ok::<_, CoreError>(space.metadata.guid)
            })
            .await
            .map(String::as_str)
    }
}
