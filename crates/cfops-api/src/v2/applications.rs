// Application endpoints.

use super::ListQuery;
use super::types::{
    ApplicationEntity, ListResponse, Resource, RouteEntity, ServiceBindingEntity,
    UpdateApplicationRequest,
};
use crate::client::CloudControllerClient;
use crate::error::Error;
use crate::pagination::Page;

impl CloudControllerClient {
    /// `GET /v2/spaces/:guid/apps`
    pub async fn list_space_applications(
        &self,
        space_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ApplicationEntity>>, Error> {
        let resp: ListResponse<ApplicationEntity> = self
            .get_with_params(
                &format!("v2/spaces/{space_id}/apps"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/apps/:guid`
    pub async fn get_application(
        &self,
        application_id: &str,
    ) -> Result<Resource<ApplicationEntity>, Error> {
        self.get(&format!("v2/apps/{application_id}")).await
    }

    /// `PUT /v2/apps/:guid`
    pub async fn update_application(
        &self,
        application_id: &str,
        body: &UpdateApplicationRequest,
    ) -> Result<Resource<ApplicationEntity>, Error> {
        self.put(&format!("v2/apps/{application_id}"), body).await
    }

    /// `DELETE /v2/apps/:guid` (synchronous, 204).
    pub async fn delete_application(&self, application_id: &str) -> Result<(), Error> {
        self.delete(&format!("v2/apps/{application_id}")).await
    }

    /// `GET /v2/apps/:guid/routes`
    pub async fn list_application_routes(
        &self,
        application_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<RouteEntity>>, Error> {
        let resp: ListResponse<RouteEntity> = self
            .get_with_params(
                &format!("v2/apps/{application_id}/routes"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/apps/:guid/service_bindings`
    pub async fn list_application_service_bindings(
        &self,
        application_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ServiceBindingEntity>>, Error> {
        let resp: ListResponse<ServiceBindingEntity> = self
            .get_with_params(
                &format!("v2/apps/{application_id}/service_bindings"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }
}
