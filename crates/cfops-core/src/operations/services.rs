use std::collections::HashMap;

use tokio::time::Instant;
use tracing::{debug, info};

use cfops_api::{collect_pages, request_pages};
use cfops_api::v2::ListQuery;
use cfops_api::v2::types::{
    BindRouteRequest, CreateServiceBindingRequest,
    CreateServiceInstanceRequest as CreateServiceInstanceBody, Resource, ServiceInstanceEntity,
};

use super::{APP_ALREADY_BOUND, Operations, ROUTE_ALREADY_BOUND, tolerate_code};
use crate::error::CoreError;
use crate::job;
use crate::model::{ServiceInstanceDetail, ServiceInstanceKind, ServiceInstanceSummary};
use crate::requests::{
    BindRouteServiceRequest, BindServiceRequest, CreateServiceInstanceRequest,
    UnbindRouteServiceRequest, UnbindServiceRequest,
};
use crate::resolve::{NameResolution, resolve_first};

/// Plan GUID → (service label, plan name).
type PlanCache = HashMap<String, (String, String)>;

/// Service instance and binding verbs, scoped to the targeted space.
pub struct Services<'a> {
    ops: &'a Operations,
}

impl<'a> Services<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    /// Managed and user-provided instances in the targeted space.
    pub async fn list_instances(&self) -> Result<Vec<ServiceInstanceSummary>, CoreError> {
        let space_id = self.ops.context.space_id().await?;
        let query = ListQuery::new().param("return_user_provided_service_instances", "true");
        let instances = collect_pages(|page| {
            self.ops
                .client
                .list_space_service_instances(space_id, &query, page)
        })
        .await?;

        let mut plans = PlanCache::new();
        let mut out = Vec::with_capacity(instances.len());
        for instance in instances {
            out.push(self.summary(instance, &mut plans).await?);
        }
        Ok(out)
    }

    /// An instance with its bound application names.
    pub async fn get_instance(&self, name: &str) -> Result<ServiceInstanceDetail, CoreError> {
        let instance = self.ops.find_service_instance(name).await?;

        let query = ListQuery::new();
        let bindings = collect_pages(|page| {
            self.ops
                .client
                .list_service_instance_service_bindings(instance.id(), &query, page)
        })
        .await?;
        let mut applications = Vec::with_capacity(bindings.len());
        for binding in bindings {
            let app = self
                .ops
                .client
                .get_application(&binding.entity.app_guid)
                .await?;
            applications.push(app.entity.name);
        }

        let description = match instance.entity.service_guid.as_deref() {
            Some(service_id) => self.ops.client.get_service(service_id).await?.entity.description,
            None => None,
        };
        let dashboard_url = instance.entity.dashboard_url.clone();
        let tags = instance.entity.tags.clone();
        let summary = self.summary(instance, &mut PlanCache::new()).await?;

        Ok(ServiceInstanceDetail {
            summary,
            description,
            dashboard_url,
            tags,
            applications,
        })
    }

    /// Resolve service label and plan name, create the instance, and wait
    /// for an asynchronous broker to finish provisioning.
    pub async fn create_instance(
        &self,
        request: &CreateServiceInstanceRequest,
    ) -> Result<ServiceInstanceSummary, CoreError> {
        let space_id = self.ops.context.space_id().await?;
        let service = self.ops.find_service(&request.service).await?;
        let plan = self.ops.find_service_plan(service.id(), &request.plan).await?;

        let body = CreateServiceInstanceBody {
            name: request.name.clone(),
            space_guid: space_id.to_owned(),
            service_plan_guid: plan.metadata.guid.clone(),
            parameters: request.parameters.clone(),
            tags: request.tags.clone(),
        };
        let created = self.ops.client.create_service_instance(&body).await?;
        let instance = self.wait_for_last_operation(created).await?;
        info!(service_instance = %request.name, "service instance created");

        let mut plans = PlanCache::new();
        plans.insert(
            plan.metadata.guid,
            (service.entity.label, plan.entity.name),
        );
        self.summary(instance, &mut plans).await
    }

    /// Delete an instance and wait for the platform job.
    pub async fn delete_instance(&self, name: &str) -> Result<(), CoreError> {
        let instance = self.ops.find_service_instance(name).await?;
        let job = self.ops.client.delete_service_instance(instance.id()).await?;
        self.ops.await_job(job).await?;
        info!(service_instance = name, "service instance deleted");
        Ok(())
    }

    /// Bind an application to an instance. An existing binding is success.
    pub async fn bind(&self, request: &BindServiceRequest) -> Result<(), CoreError> {
        let app = self.ops.find_application(&request.application).await?;
        let instance = self
            .ops
            .find_service_instance(&request.service_instance)
            .await?;

        let body = CreateServiceBindingRequest {
            app_guid: app.metadata.guid.clone(),
            service_instance_guid: instance.metadata.guid.clone(),
            name: None,
            parameters: request.parameters.clone(),
        };
        let bound = tolerate_code(
            self.ops.client.create_service_binding(&body).await,
            APP_ALREADY_BOUND,
        )?;
        if bound.is_some() {
            info!(
                application = %request.application,
                service_instance = %request.service_instance,
                "service bound"
            );
        }
        Ok(())
    }

    /// Remove the binding between an application and an instance and wait
    /// for the platform job.
    pub async fn unbind(&self, request: &UnbindServiceRequest) -> Result<(), CoreError> {
        let app = self.ops.find_application(&request.application).await?;
        let instance = self
            .ops
            .find_service_instance(&request.service_instance)
            .await?;

        let query = ListQuery::new().filter("service_instance_guid", instance.id());
        let target = format!("{}/{}", request.application, request.service_instance);
        let binding = resolve_first(
            request_pages(|page| {
                self.ops
                    .client
                    .list_application_service_bindings(app.id(), &query, page)
            }),
            "Service binding",
            &target,
            NameResolution::FirstMatch,
            |_| true,
        )
        .await?;

        let job = self.ops.client.delete_service_binding(binding.id()).await?;
        self.ops.await_job(job).await?;
        info!(
            application = %request.application,
            service_instance = %request.service_instance,
            "service unbound"
        );
        Ok(())
    }

    /// Bind a route service instance to a route. A route that is already
    /// bound to this instance is success.
    pub async fn bind_route(&self, request: &BindRouteServiceRequest) -> Result<(), CoreError> {
        let instance = self
            .ops
            .find_service_instance(&request.service_instance)
            .await?;
        let domain = self.ops.find_domain(&request.route.domain).await?;
        let route = self.ops.find_route(&request.route, domain.id()).await?;

        let body = BindRouteRequest {
            parameters: request.parameters.clone(),
        };
        let bound = tolerate_code(
            self.ops
                .client
                .bind_route_to_service_instance(instance.id(), route.id(), &body)
                .await,
            ROUTE_ALREADY_BOUND,
        )?;
        if bound.is_some() {
            info!(service_instance = %request.service_instance, "route service bound");
        }
        Ok(())
    }

    pub async fn unbind_route(&self, request: &UnbindRouteServiceRequest) -> Result<(), CoreError> {
        let instance = self
            .ops
            .find_service_instance(&request.service_instance)
            .await?;
        let domain = self.ops.find_domain(&request.route.domain).await?;
        let route = self.ops.find_route(&request.route, domain.id()).await?;

        self.ops
            .client
            .unbind_route_from_service_instance(instance.id(), route.id())
            .await?;
        info!(service_instance = %request.service_instance, "route service unbound");
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Poll an instance while its `last_operation` is `in progress`.
    async fn wait_for_last_operation(
        &self,
        instance: Resource<ServiceInstanceEntity>,
    ) -> Result<Resource<ServiceInstanceEntity>, CoreError> {
        let started = Instant::now();
        let mut instance = instance;

        loop {
            let Some(op) = instance.entity.last_operation.as_ref() else {
                return Ok(instance);
            };
            match op.state.as_deref() {
                Some("in progress") => {}
                Some("failed") => {
                    return Err(CoreError::JobFailed {
                        job_id: instance.metadata.guid.clone(),
                        code: None,
                        error_code: None,
                        description: op
                            .description
                            .clone()
                            .unwrap_or_else(|| "service operation failed".into()),
                    });
                }
                _ => return Ok(instance),
            }

            let id = instance.metadata.guid.clone();
            debug!(service_instance = %id, "service operation in progress");
            job::pause(&self.ops.settings.poll, &self.ops.cancel, started, &id).await?;
            instance = self.ops.client.get_service_instance(&id).await?;
        }
    }

    async fn summary(
        &self,
        instance: Resource<ServiceInstanceEntity>,
        plans: &mut PlanCache,
    ) -> Result<ServiceInstanceSummary, CoreError> {
        let kind = ServiceInstanceKind::of(&instance.entity);
        let names = match instance.entity.service_plan_guid.as_deref() {
            Some(plan_id) if kind == ServiceInstanceKind::Managed => {
                Some(self.plan_names(plan_id, plans).await?)
            }
            _ => None,
        };
        let last_operation = instance.entity.last_operation.as_ref().map(|op| {
            format!(
                "{} {}",
                op.operation_type.as_deref().unwrap_or_default(),
                op.state.as_deref().unwrap_or_default()
            )
            .trim()
            .to_owned()
        });
        let (service, plan) = names.unzip();

        Ok(ServiceInstanceSummary {
            id: instance.metadata.guid,
            name: instance.entity.name,
            kind,
            service,
            plan,
            last_operation,
        })
    }

    async fn plan_names(
        &self,
        plan_id: &str,
        plans: &mut PlanCache,
    ) -> Result<(String, String), CoreError> {
        if let Some(names) = plans.get(plan_id) {
            return Ok(names.clone());
        }
        let plan = self.ops.client.get_service_plan(plan_id).await?;
        let service = self.ops.client.get_service(&plan.entity.service_guid).await?;
        let names = (service.entity.label, plan.entity.name);
        plans.insert(plan_id.to_owned(), names.clone());
        Ok(names)
    }
}
