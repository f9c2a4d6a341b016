//! Route command handlers.

use tabled::Tabled;

use cfops_core::{MapRouteRequest, Operations, RouteRef, RouteSummary};

use crate::cli::{GlobalOpts, RoutesArgs, RoutesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Apps")]
    apps: String,
}

impl From<&RouteSummary> for RouteRow {
    fn from(r: &RouteSummary) -> Self {
        Self {
            host: r.host.clone(),
            domain: r.domain.clone(),
            path: r.path.clone(),
            port: output::or_dash(r.port),
            apps: output::join_or_dash(&r.applications),
        }
    }
}

fn describe(route: &RouteRef) -> String {
    cfops_core::model::route_url(&route.host, &route.domain, &route.path, route.port)
}

pub async fn handle(
    ops: &Operations,
    args: RoutesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RoutesCommand::List => {
            let routes = ops.routes().list().await?;
            let out =
                output::render_list(&global.output, &routes, |r| RouteRow::from(r), RouteSummary::url);
            output::print_output(&out, global.quiet);
        }

        RoutesCommand::Create(route) => {
            let route = RouteRef::from(route);
            let created = ops.routes().create(&route).await?;
            output::print_status(&format!("Route {} created", created.url()), global.quiet);
        }

        RoutesCommand::Delete(route) => {
            let route = RouteRef::from(route);
            let url = describe(&route);
            if !util::confirm(&format!("Delete route '{url}'?"), "routes delete", global)? {
                return Ok(());
            }
            util::with_spinner(&format!("Deleting {url}"), global, ops.routes().delete(&route))
                .await?;
            output::print_status(&format!("Route {url} deleted"), global.quiet);
        }

        RoutesCommand::Map { app, route } => {
            let request = MapRouteRequest {
                application: app,
                route: route.into(),
            };
            ops.routes().map(&request).await?;
            output::print_status(
                &format!("Route {} mapped to {}", describe(&request.route), request.application),
                global.quiet,
            );
        }

        RoutesCommand::Unmap { app, route } => {
            let request = MapRouteRequest {
                application: app,
                route: route.into(),
            };
            ops.routes().unmap(&request).await?;
            output::print_status(
                &format!("Route {} unmapped from {}", describe(&request.route), request.application),
                global.quiet,
            );
        }
    }
    Ok(())
}
