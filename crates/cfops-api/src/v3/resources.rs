use super::types::{ApplicationV3, OrganizationV3, PaginatedResponse, SpaceV3, V3Query};
use crate::client::CloudControllerClient;
use crate::error::Error;
use crate::pagination::Page;

impl CloudControllerClient {
    /// `GET /v3/organizations`
    pub async fn list_organizations_v3(
        &self,
        query: &V3Query,
        page: u32,
    ) -> Result<Page<OrganizationV3>, Error> {
        let resp: PaginatedResponse<OrganizationV3> = self
            .get_with_params("v3/organizations", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v3/spaces`
    pub async fn list_spaces_v3(
        &self,
        query: &V3Query,
        page: u32,
    ) -> Result<Page<SpaceV3>, Error> {
        let resp: PaginatedResponse<SpaceV3> = self
            .get_with_params("v3/spaces", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v3/apps`
    pub async fn list_applications_v3(
        &self,
        query: &V3Query,
        page: u32,
    ) -> Result<Page<ApplicationV3>, Error> {
        let resp: PaginatedResponse<ApplicationV3> = self
            .get_with_params("v3/apps", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }
}
