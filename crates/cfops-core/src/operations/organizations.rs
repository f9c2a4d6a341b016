use cfops_api::v2::ListQuery;
use cfops_api::{collect_pages, request_pages};

use super::Operations;
use crate::error::CoreError;
use crate::model::{OrganizationDetail, OrganizationSummary};
use crate::resolve::resolve_by_name;

/// Organization verbs. These do not need a targeted organization.
pub struct Organizations<'a> {
    ops: &'a Operations,
}

impl<'a> Organizations<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    pub async fn list(&self) -> Result<Vec<OrganizationSummary>, CoreError> {
        let query = ListQuery::new();
        let orgs = collect_pages(|page| self.ops.client.list_organizations(&query, page)).await?;
        Ok(orgs.into_iter().map(OrganizationSummary::from).collect())
    }

    /// An organization with the names of its spaces.
    pub async fn get(&self, name: &str) -> Result<OrganizationDetail, CoreError> {
        let query = ListQuery::new().filter("name", name);
        let org = resolve_by_name(
            request_pages(|page| self.ops.client.list_organizations(&query, page)),
            name,
            "Organization",
            self.ops.mode(),
        )
        .await?;

        let query = ListQuery::new().filter("organization_guid", org.id());
        let spaces = collect_pages(|page| self.ops.client.list_spaces(&query, page))
            .await?
            .into_iter()
            .map(|s| s.entity.name)
            .collect();

        Ok(OrganizationDetail {
            id: org.metadata.guid,
            name: org.entity.name,
            status: org.entity.status,
            quota_definition_id: org.entity.quota_definition_guid,
            spaces,
        })
    }
}
