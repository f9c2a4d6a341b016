// Organization and space endpoints.

use super::ListQuery;
use super::types::{DomainEntity, ListResponse, OrganizationEntity, Resource, SpaceEntity};
use crate::client::CloudControllerClient;
use crate::error::Error;
use crate::pagination::Page;

impl CloudControllerClient {
    // ── Organizations ────────────────────────────────────────────────

    /// `GET /v2/organizations`
    pub async fn list_organizations(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<OrganizationEntity>>, Error> {
        let resp: ListResponse<OrganizationEntity> = self
            .get_with_params("v2/organizations", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/organizations/:guid`
    pub async fn get_organization(
        &self,
        organization_id: &str,
    ) -> Result<Resource<OrganizationEntity>, Error> {
        self.get(&format!("v2/organizations/{organization_id}"))
            .await
    }

    /// `GET /v2/organizations/:guid/private_domains`
    pub async fn list_organization_private_domains(
        &self,
        organization_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<DomainEntity>>, Error> {
        let resp: ListResponse<DomainEntity> = self
            .get_with_params(
                &format!("v2/organizations/{organization_id}/private_domains"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    // ── Spaces ───────────────────────────────────────────────────────

    /// `GET /v2/spaces`
    pub async fn list_spaces(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<SpaceEntity>>, Error> {
        let resp: ListResponse<SpaceEntity> = self
            .get_with_params("v2/spaces", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/spaces/:guid`
    pub async fn get_space(&self, space_id: &str) -> Result<Resource<SpaceEntity>, Error> {
        self.get(&format!("v2/spaces/{space_id}")).await
    }
}
