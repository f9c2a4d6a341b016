// Name → resource lookups shared by the sub-facades.

use std::collections::HashMap;

use cfops_api::collect_pages;
use cfops_api::request_pages;
use cfops_api::v2::ListQuery;
use cfops_api::v2::types::{
    ApplicationEntity, DomainEntity, Resource, RouteEntity, ServiceEntity, ServiceInstanceEntity,
    ServicePlanEntity,
};

use super::Operations;
use crate::error::CoreError;
use crate::model::{RouteSummary, route_url};
use crate::requests::RouteRef;
use crate::resolve::{resolve_by_name, resolve_first};

impl Operations {
    pub(crate) async fn find_application(
        &self,
        name: &str,
    ) -> Result<Resource<ApplicationEntity>, CoreError> {
        let space_id = self.context.space_id().await?;
        let query = ListQuery::new().filter("name", name);
        resolve_by_name(
            request_pages(|page| {
                self.client
                    .list_space_applications(space_id, &query, page)
            }),
            name,
            "Application",
            self.mode(),
        )
        .await
    }

    pub(crate) async fn find_service_instance(
        &self,
        name: &str,
    ) -> Result<Resource<ServiceInstanceEntity>, CoreError> {
        let space_id = self.context.space_id().await?;
        let query = ListQuery::new()
            .filter("name", name)
            .param("return_user_provided_service_instances", "true");
        resolve_by_name(
            request_pages(|page| {
                self.client
                    .list_space_service_instances(space_id, &query, page)
            }),
            name,
            "Service instance",
            self.mode(),
        )
        .await
    }

    pub(crate) async fn find_service(
        &self,
        label: &str,
    ) -> Result<Resource<ServiceEntity>, CoreError> {
        let query = ListQuery::new().filter("label", label);
        resolve_by_name(
            request_pages(|page| self.client.list_services(&query, page)),
            label,
            "Service",
            self.mode(),
        )
        .await
    }

    /// Plans cannot be filtered by name, only by their service.
    pub(crate) async fn find_service_plan(
        &self,
        service_id: &str,
        name: &str,
    ) -> Result<Resource<ServicePlanEntity>, CoreError> {
        let query = ListQuery::new().filter("service_guid", service_id);
        resolve_by_name(
            request_pages(|page| self.client.list_service_plans(&query, page)),
            name,
            "Service plan",
            self.mode(),
        )
        .await
    }

    /// Private domains of the targeted organization first, then shared
    /// domains.
    pub(crate) async fn find_domain(
        &self,
        name: &str,
    ) -> Result<Resource<DomainEntity>, CoreError> {
        let organization_id = self.context.organization_id().await?;
        let query = ListQuery::new().filter("name", name);

        let private = resolve_by_name(
            request_pages(|page| {
                self.client
                    .list_organization_private_domains(organization_id, &query, page)
            }),
            name,
            "Domain",
            self.mode(),
        )
        .await;
        match private {
            Err(CoreError::NotFound { .. }) => {}
            other => return other,
        }

        resolve_by_name(
            request_pages(|page| self.client.list_shared_domains(&query, page)),
            name,
            "Domain",
            self.mode(),
        )
        .await
    }

    pub(crate) async fn find_route(
        &self,
        route: &RouteRef,
        domain_id: &str,
    ) -> Result<Resource<RouteEntity>, CoreError> {
        let mut query = ListQuery::new().filter("domain_guid", domain_id);
        if !route.host.is_empty() {
            query = query.filter("host", route.host.as_str());
        }
        if !route.path.is_empty() {
            query = query.filter("path", route.path.as_str());
        }
        if let Some(port) = route.port {
            query = query.filter("port", port.to_string());
        }

        let description = route_url(&route.host, &route.domain, &route.path, route.port);
        resolve_first(
            request_pages(|page| self.client.list_routes(&query, page)),
            "Route",
            &description,
            self.mode(),
            |r| {
                r.entity.host == route.host
                    && r.entity.path == route.path
                    && (route.port.is_none() || r.entity.port == route.port)
            },
        )
        .await
    }

    /// Render a route with its domain name and mapped application names.
    /// `domains` caches GUID → name across calls.
    pub(crate) async fn route_summary(
        &self,
        route: Resource<RouteEntity>,
        domains: &mut HashMap<String, String>,
    ) -> Result<RouteSummary, CoreError> {
        let domain = self.domain_name(&route.entity.domain_guid, domains).await?;
        let query = ListQuery::new();
        let applications = collect_pages(|page| {
            self.client
                .list_route_applications(route.id(), &query, page)
        })
        .await?
        .into_iter()
        .map(|app| app.entity.name)
        .collect();

        Ok(RouteSummary {
            id: route.metadata.guid,
            host: route.entity.host,
            domain,
            path: route.entity.path,
            port: route.entity.port,
            applications,
        })
    }

    pub(crate) async fn domain_name(
        &self,
        domain_id: &str,
        cache: &mut HashMap<String, String>,
    ) -> Result<String, CoreError> {
        if let Some(name) = cache.get(domain_id) {
            return Ok(name.clone());
        }
        let domain = self.client.get_domain(domain_id).await?;
        cache.insert(domain_id.to_owned(), domain.entity.name.clone());
        Ok(domain.entity.name)
    }
}
