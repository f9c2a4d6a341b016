use cfops_api::v2::ListQuery;
use cfops_api::{collect_pages, request_pages};

use super::Operations;
use crate::error::CoreError;
use crate::model::{SpaceDetail, SpaceSummary};
use crate::resolve::resolve_by_name;

/// Space verbs, scoped to the targeted organization.
pub struct Spaces<'a> {
    ops: &'a Operations,
}

impl<'a> Spaces<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    pub async fn list(&self) -> Result<Vec<SpaceSummary>, CoreError> {
        let organization_id = self.ops.context.organization_id().await?;
        let query = ListQuery::new().filter("organization_guid", organization_id);
        let spaces = collect_pages(|page| self.ops.client.list_spaces(&query, page)).await?;
        Ok(spaces.into_iter().map(SpaceSummary::from).collect())
    }

    /// A space with the names of its applications and service instances.
    pub async fn get(&self, name: &str) -> Result<SpaceDetail, CoreError> {
        let organization_id = self.ops.context.organization_id().await?;
        let query = ListQuery::new()
            .filter("name", name)
            .filter("organization_guid", organization_id);
        let space = resolve_by_name(
            request_pages(|page| self.ops.client.list_spaces(&query, page)),
            name,
            "Space",
            self.ops.mode(),
        )
        .await?;

        let organization = match self.ops.context.organization_name() {
            Some(name) => name.to_owned(),
            None => {
                self.ops
                    .client
                    .get_organization(organization_id)
                    .await?
                    .entity
                    .name
            }
        };

        let query = ListQuery::new();
        let applications = collect_pages(|page| {
            self.ops
                .client
                .list_space_applications(space.id(), &query, page)
        })
        .await?
        .into_iter()
        .map(|a| a.entity.name)
        .collect();

        let query = ListQuery::new().param("return_user_provided_service_instances", "true");
        let services = collect_pages(|page| {
            self.ops
                .client
                .list_space_service_instances(space.id(), &query, page)
        })
        .await?
        .into_iter()
        .map(|s| s.entity.name)
        .collect();

        Ok(SpaceDetail {
            id: space.metadata.guid,
            name: space.entity.name,
            organization,
            allow_ssh: space.entity.allow_ssh,
            applications,
            services,
        })
    }
}
