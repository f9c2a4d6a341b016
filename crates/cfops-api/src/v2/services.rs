// Service, plan, instance, and binding endpoints.

use super::ListQuery;
use super::types::{
    BindRouteRequest, CreateServiceBindingRequest, CreateServiceInstanceRequest, JobResource,
    ListResponse, Resource, ServiceBindingEntity, ServiceEntity, ServiceInstanceEntity,
    ServicePlanEntity,
};
use crate::client::CloudControllerClient;
use crate::error::Error;
use crate::pagination::Page;

fn async_params() -> Vec<(String, String)> {
    vec![("async".to_owned(), "true".to_owned())]
}

impl CloudControllerClient {
    // ── Services & plans ─────────────────────────────────────────────

    /// `GET /v2/services`
    pub async fn list_services(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ServiceEntity>>, Error> {
        let resp: ListResponse<ServiceEntity> = self
            .get_with_params("v2/services", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/services/:guid`
    pub async fn get_service(&self, service_id: &str) -> Result<Resource<ServiceEntity>, Error> {
        self.get(&format!("v2/services/{service_id}")).await
    }

    /// `GET /v2/service_plans`
    pub async fn list_service_plans(
        &self,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ServicePlanEntity>>, Error> {
        let resp: ListResponse<ServicePlanEntity> = self
            .get_with_params("v2/service_plans", &query.to_params(page))
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/service_plans/:guid`
    pub async fn get_service_plan(
        &self,
        service_plan_id: &str,
    ) -> Result<Resource<ServicePlanEntity>, Error> {
        self.get(&format!("v2/service_plans/{service_plan_id}"))
            .await
    }

    // ── Service instances ────────────────────────────────────────────

    /// `GET /v2/spaces/:guid/service_instances`
    ///
    /// Pass `return_user_provided_service_instances=true` through
    /// [`ListQuery::param`] to include user-provided instances.
    pub async fn list_space_service_instances(
        &self,
        space_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ServiceInstanceEntity>>, Error> {
        let resp: ListResponse<ServiceInstanceEntity> = self
            .get_with_params(
                &format!("v2/spaces/{space_id}/service_instances"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `GET /v2/service_instances/:guid`
    pub async fn get_service_instance(
        &self,
        service_instance_id: &str,
    ) -> Result<Resource<ServiceInstanceEntity>, Error> {
        self.get(&format!("v2/service_instances/{service_instance_id}"))
            .await
    }

    /// `POST /v2/service_instances?accepts_incomplete=true`
    pub async fn create_service_instance(
        &self,
        body: &CreateServiceInstanceRequest,
    ) -> Result<Resource<ServiceInstanceEntity>, Error> {
        self.post(
            "v2/service_instances",
            &[("accepts_incomplete".to_owned(), "true".to_owned())],
            body,
        )
        .await
    }

    /// `DELETE /v2/service_instances/:guid?async=true`. Returns the job.
    pub async fn delete_service_instance(
        &self,
        service_instance_id: &str,
    ) -> Result<JobResource, Error> {
        self.delete_with_params(
            &format!("v2/service_instances/{service_instance_id}"),
            &async_params(),
        )
        .await
    }

    // ── Bindings ─────────────────────────────────────────────────────

    /// `POST /v2/service_bindings`
    pub async fn create_service_binding(
        &self,
        body: &CreateServiceBindingRequest,
    ) -> Result<Resource<ServiceBindingEntity>, Error> {
        self.post("v2/service_bindings", &[], body).await
    }

    /// `GET /v2/service_instances/:guid/service_bindings`
    pub async fn list_service_instance_service_bindings(
        &self,
        service_instance_id: &str,
        query: &ListQuery,
        page: u32,
    ) -> Result<Page<Resource<ServiceBindingEntity>>, Error> {
        let resp: ListResponse<ServiceBindingEntity> = self
            .get_with_params(
                &format!("v2/service_instances/{service_instance_id}/service_bindings"),
                &query.to_params(page),
            )
            .await?;
        Ok(resp.into_page(page))
    }

    /// `DELETE /v2/service_bindings/:guid?async=true`. Returns the job.
    pub async fn delete_service_binding(
        &self,
        service_binding_id: &str,
    ) -> Result<JobResource, Error> {
        self.delete_with_params(
            &format!("v2/service_bindings/{service_binding_id}"),
            &async_params(),
        )
        .await
    }

    /// `PUT /v2/service_instances/:guid/routes/:route_guid`
    pub async fn bind_route_to_service_instance(
        &self,
        service_instance_id: &str,
        route_id: &str,
        body: &BindRouteRequest,
    ) -> Result<Resource<ServiceInstanceEntity>, Error> {
        self.put(
            &format!("v2/service_instances/{service_instance_id}/routes/{route_id}"),
            body,
        )
        .await
    }

    /// `DELETE /v2/service_instances/:guid/routes/:route_guid`
    pub async fn unbind_route_from_service_instance(
        &self,
        service_instance_id: &str,
        route_id: &str,
    ) -> Result<(), Error> {
        self.delete(&format!(
            "v2/service_instances/{service_instance_id}/routes/{route_id}"
        ))
        .await
    }
}
