// Domain and route endpoints.

use super::ListQuery;
use super::types::{
    ApplicationEntity, CreateRouteRequest, DomainEntity, JobResource, ListResponse, Resource,
    RouteEntity,
};
use crate::client::CloudControllerClient;
use crate::error::Error;
use crate::pagination::Page;

impl CloudControllerClient {
    // ── Domains ──────────────────────────────────────────────────────

    /// `GET /v2/shared_domains`
    pub async fn list_shared_domains(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<DomainEntity>>, Error> {
        let resp: ListResponse<DomainEntity> = self
            .get_with_params("v2/shared_domains", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/private_domains`
    pub async fn list_private_domains(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<DomainEntity>>, Error> {
        let resp: ListResponse<DomainEntity> = self
            .get_with_params("v2/private_domains", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/domains/:guid`. Resolves shared and private domains alike.
    pub async fn get_domain(&self, domain_id: &str) -> Result<Resource<DomainEntity>, Error> {
        self.get(&format!("v2/domains/{domain_id}")).await
    }

    // ── Routes ───────────────────────────────────────────────────────

    /// `GET /v2/routes`
    pub async fn list_routes(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<RouteEntity>>, Error> {
        let resp: ListResponse<RouteEntity> = self
            .get_with_params("v2/routes", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/spaces/:guid/routes`
    pub async fn list_space_routes(
        &self,
        space_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<RouteEntity>>, Error> {
        let resp: ListResponse<RouteEntity> = self
            .get_with_params(
                &format!("v2/spaces/{space_id}/routes"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/routes/:guid/apps`
    pub async fn list_route_applications(
        &self,
        route_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ApplicationEntity>>, Error> {
        let resp: ListResponse<ApplicationEntity> = self
            .get_with_params(
                &format!("v2/routes/{route_id}/apps"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `POST /v2/routes`
    pub async fn create_route(
        &self,
        body: &CreateRouteRequest,
    ) -> Result<Resource<RouteEntity>, Error> {
        self.post("v2/routes", &[], body).await
    }

    /// `DELETE /v2/routes/:guid?async=true`. Returns the job.
    pub async fn delete_route(&self, route_id: &str) -> Result<JobResource, Error> {
        self.delete_with_params(
            &format!("v2/routes/{route_id}"),
            &[("async".to_owned(), "true".to_owned())],
        )
        .await
    }

    /// `PUT /v2/routes/:guid/apps/:app_guid`
    pub async fn associate_route_application(
        &self,
        route_id: &str,
        application_id: &str,
    ) -> Result<Resource<RouteEntity>, Error> {
        self.put(
            &format!("v2/routes/{route_id}/apps/{application_id}"),
            &serde_json::json!({}),
        )
        .await
    }

    /// `DELETE /v2/routes/:guid/apps/:app_guid`
    pub async fn remove_route_application(
        &self,
        route_id: &str,
        application_id: &str,
    ) -> Result<(), Error> {
        self.delete(&format!("v2/routes/{route_id}/apps/{application_id}"))
            .await
    }
}
