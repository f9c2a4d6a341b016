use std::collections::HashMap;

use tracing::info;

use cfops_api::collect_pages;
use cfops_api::v2::ListQuery;
use cfops_api::v2::types::CreateRouteRequest as CreateRouteBody;

use super::Operations;
use crate::error::CoreError;
use crate::model::RouteSummary;
use crate::requests::{CreateRouteRequest, MapRouteRequest, RouteRef};

/// Route verbs, scoped to the targeted space.
pub struct Routes<'a> {
    ops: &'a Operations,
}

impl<'a> Routes<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    /// Routes in the targeted space with domain names and mapped apps.
    pub async fn list(&self) -> Result<Vec<RouteSummary>, CoreError> {
        let space_id = self.ops.context.space_id().await?;
        let query = ListQuery::new();
        let routes =
            collect_pages(|page| self.ops.client.list_space_routes(space_id, &query, page)).await?;

        let mut domains = HashMap::new();
        let mut out = Vec::with_capacity(routes.len());
        for route in routes {
            out.push(self.ops.route_summary(route, &mut domains).await?);
        }
        Ok(out)
    }

    pub async fn create(&self, request: &CreateRouteRequest) -> Result<RouteSummary, CoreError> {
        let space_id = self.ops.context.space_id().await?;
        let domain = self.ops.find_domain(&request.domain).await?;
        let route = self
            .ops
            .client
            .create_route(&create_body(request, domain.id(), space_id))
            .await?;
        info!(route = %request_url(request), "route created");

        Ok(RouteSummary {
            id: route.metadata.guid,
            host: route.entity.host,
            domain: domain.entity.name,
            path: route.entity.path,
            port: route.entity.port,
            applications: Vec::new(),
        })
    }

    /// Delete a route and wait for the platform job.
    pub async fn delete(&self, request: &RouteRef) -> Result<(), CoreError> {
        let domain = self.ops.find_domain(&request.domain).await?;
        let route = self.ops.find_route(request, domain.id()).await?;
        let job = self.ops.client.delete_route(route.id()).await?;
        self.ops.await_job(job).await?;
        info!(route = %request_url(request), "route deleted");
        Ok(())
    }

    /// Map a route to an application, creating the route if it does not
    /// exist yet.
    pub async fn map(&self, request: &MapRouteRequest) -> Result<(), CoreError> {
        let app = self.ops.find_application(&request.application).await?;
        let domain = self.ops.find_domain(&request.route.domain).await?;

        let route_id = match self.ops.find_route(&request.route, domain.id()).await {
            Ok(route) => route.metadata.guid,
            Err(CoreError::NotFound { .. }) => {
                let space_id = self.ops.context.space_id().await?;
                let body = create_body(&request.route, domain.id(), space_id);
                self.ops.client.create_route(&body).await?.metadata.guid
            }
            Err(e) => return Err(e),
        };

        self.ops
            .client
            .associate_route_application(&route_id, app.id())
            .await?;
        info!(
            route = %request_url(&request.route),
            application = %request.application,
            "route mapped"
        );
        Ok(())
    }

    pub async fn unmap(&self, request: &MapRouteRequest) -> Result<(), CoreError> {
        let app = self.ops.find_application(&request.application).await?;
        let domain = self.ops.find_domain(&request.route.domain).await?;
        let route = self.ops.find_route(&request.route, domain.id()).await?;

        self.ops
            .client
            .remove_route_application(route.id(), app.id())
            .await?;
        info!(
            route = %request_url(&request.route),
            application = %request.application,
            "route unmapped"
        );
        Ok(())
    }
}

fn create_body(route: &RouteRef, domain_id: &str, space_id: &str) -> CreateRouteBody {
    CreateRouteBody {
        domain_guid: domain_id.to_owned(),
        space_guid: space_id.to_owned(),
        host: (!route.host.is_empty()).then(|| route.host.clone()),
        path: (!route.path.is_empty()).then(|| route.path.clone()),
        port: route.port,
    }
}

fn request_url(route: &RouteRef) -> String {
    crate::model::route_url(&route.host, &route.domain, &route.path, route.port)
}
