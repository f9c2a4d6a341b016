use std::collections::HashMap;

use tracing::info;

use cfops_api::collect_pages;
use cfops_api::v2::ListQuery;
use cfops_api::v2::types::UpdateApplicationRequest;

use super::Operations;
use crate::error::CoreError;
use crate::model::{AppState, ApplicationDetail, ApplicationSummary, route_url};
use crate::requests::DeleteApplicationRequest;

/// Application verbs, scoped to the targeted space.
pub struct Applications<'a> {
    ops: &'a Operations,
}

impl<'a> Applications<'a> {
    pub(super) fn new(ops: &'a Operations) -> Self {
        Self { ops }
    }

    pub async fn list(&self) -> Result<Vec<ApplicationSummary>, CoreError> {
        let space_id = self.ops.context.space_id().await?;
        let query = ListQuery::new();
        let apps = collect_pages(|page| {
            self.ops
                .client
                .list_space_applications(space_id, &query, page)
        })
        .await?;
        Ok(apps.into_iter().map(ApplicationSummary::from).collect())
    }

    /// An application with its mapped routes rendered as URLs.
    pub async fn get(&self, name: &str) -> Result<ApplicationDetail, CoreError> {
        let app = self.ops.find_application(name).await?;

        let query = ListQuery::new();
        let routes = collect_pages(|page| {
            self.ops
                .client
                .list_application_routes(app.id(), &query, page)
        })
        .await?;

        let mut domains = HashMap::new();
        let mut urls = Vec::with_capacity(routes.len());
        for route in routes {
            let domain = self
                .ops
                .domain_name(&route.entity.domain_guid, &mut domains)
                .await?;
            urls.push(route_url(
                &route.entity.host,
                &domain,
                &route.entity.path,
                route.entity.port,
            ));
        }

        let buildpack = app.entity.buildpack.clone();
        let detected_buildpack = app.entity.detected_buildpack.clone();
        let health_check_type = app.entity.health_check_type.clone();
        let package_state = app.entity.package_state.clone();
        Ok(ApplicationDetail {
            summary: ApplicationSummary::from(app),
            buildpack,
            detected_buildpack,
            health_check_type,
            package_state,
            urls,
        })
    }

    pub async fn start(&self, name: &str) -> Result<ApplicationSummary, CoreError> {
        self.set_state(name, AppState::Started).await
    }

    pub async fn stop(&self, name: &str) -> Result<ApplicationSummary, CoreError> {
        self.set_state(name, AppState::Stopped).await
    }

    /// Delete an application. With `delete_routes`, every mapped route is
    /// deleted first, one at a time, each job polled to completion.
    pub async fn delete(&self, request: &DeleteApplicationRequest) -> Result<(), CoreError> {
        let app = self.ops.find_application(&request.name).await?;

        if request.delete_routes {
            let query = ListQuery::new();
            let routes = collect_pages(|page| {
                self.ops
                    .client
                    .list_application_routes(app.id(), &query, page)
            })
            .await?;
            for route in routes {
                let job = self.ops.client.delete_route(route.id()).await?;
                self.ops.await_job(job).await?;
            }
        }

        self.ops.client.delete_application(app.id()).await?;
        info!(application = %request.name, "application deleted");
        Ok(())
    }

    async fn set_state(&self, name: &str, state: AppState) -> Result<ApplicationSummary, CoreError> {
        let app = self.ops.find_application(name).await?;
        let body = UpdateApplicationRequest {
            state: Some(state.to_string()),
            ..UpdateApplicationRequest::default()
        };
        let updated = self.ops.client.update_application(app.id(), &body).await?;
        info!(application = name, %state, "application state updated");
        Ok(ApplicationSummary::from(updated))
    }
}
