//! Service instance and binding command handlers.

use tabled::Tabled;

use cfops_core::{
    BindRouteServiceRequest, BindServiceRequest, CreateServiceInstanceRequest, Operations,
    RouteRef, ServiceInstanceDetail, ServiceInstanceSummary, UnbindRouteServiceRequest,
    UnbindServiceRequest,
};

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Last Operation")]
    last_operation: String,
}

impl From<&ServiceInstanceSummary> for InstanceRow {
    fn from(s: &ServiceInstanceSummary) -> Self {
        Self {
            name: s.name.clone(),
            service: s
                .service
                .clone()
                .unwrap_or_else(|| s.kind.to_string()),
            plan: output::or_dash(s.plan.as_deref()),
            last_operation: output::or_dash(s.last_operation.as_deref()),
        }
    }
}

fn detail(d: &ServiceInstanceDetail) -> Vec<(&'static str, String)> {
    let s = &d.summary;
    vec![
        ("Name", s.name.clone()),
        ("GUID", s.id.clone()),
        ("Kind", s.kind.to_string()),
        ("Service", output::or_dash(s.service.as_deref())),
        ("Plan", output::or_dash(s.plan.as_deref())),
        ("Description", output::or_dash(d.description.as_deref())),
        ("Last operation", output::or_dash(s.last_operation.as_deref())),
        ("Dashboard", output::or_dash(d.dashboard_url.as_deref())),
        ("Tags", output::join_or_dash(&d.tags)),
        ("Bound apps", output::join_or_dash(&d.applications)),
    ]
}

#[allow(clippy::too_many_lines)]
pub async fn handle(
    ops: &Operations,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let services = ops.services();

    match args.command {
        ServicesCommand::List => {
            let instances = services.list_instances().await?;
            let out = output::render_list(
                &global.output,
                &instances,
                |s| InstanceRow::from(s),
                |s| s.name.clone(),
            );
            output::print_output(&out, global.quiet);
        }

        ServicesCommand::Get { name } => {
            let instance = services.get_instance(&name).await?;
            let out = output::render_single(
                &global.output,
                &instance,
                detail,
                |d| d.summary.id.clone(),
                output::should_color(&global.color),
            );
            output::print_output(&out, global.quiet);
        }

        ServicesCommand::Create {
            service,
            plan,
            name,
            config,
            config_file,
            tags,
        } => {
            let request = CreateServiceInstanceRequest {
                parameters: util::json_params(config.as_deref(), config_file.as_deref())?,
                name,
                service,
                plan,
                tags,
            };
            let created = util::with_spinner(
                &format!("Creating service instance {}", request.name),
                global,
                services.create_instance(&request),
            )
            .await?;
            output::print_status(
                &format!("Service instance {} created", created.name),
                global.quiet,
            );
        }

        ServicesCommand::Delete { name } => {
            if !util::confirm(
                &format!("Delete service instance '{name}'?"),
                "services delete",
                global,
            )? {
                return Ok(());
            }
            util::with_spinner(
                &format!("Deleting service instance {name}"),
                global,
                services.delete_instance(&name),
            )
            .await?;
            output::print_status(&format!("Service instance {name} deleted"), global.quiet);
        }

        ServicesCommand::Bind {
            app,
            service_instance,
            config,
        } => {
            let request = BindServiceRequest {
                parameters: util::json_params(config.as_deref(), None)?,
                application: app,
                service_instance,
            };
            services.bind(&request).await?;
            output::print_status(
                &format!(
                    "Service instance {} bound to {}",
                    request.service_instance, request.application
                ),
                global.quiet,
            );
        }

        ServicesCommand::Unbind {
            app,
            service_instance,
        } => {
            let request = UnbindServiceRequest {
                application: app,
                service_instance,
            };
            util::with_spinner("Unbinding", global, services.unbind(&request)).await?;
            output::print_status(
                &format!(
                    "Service instance {} unbound from {}",
                    request.service_instance, request.application
                ),
                global.quiet,
            );
        }

        ServicesCommand::BindRoute {
            service_instance,
            route,
            config,
        } => {
            let request = BindRouteServiceRequest {
                parameters: util::json_params(config.as_deref(), None)?,
                service_instance,
                route: RouteRef::from(route),
            };
            services.bind_route(&request).await?;
            output::print_status(
                &format!("Route bound to service instance {}", request.service_instance),
                global.quiet,
            );
        }

        ServicesCommand::UnbindRoute {
            service_instance,
            route,
        } => {
            let request = UnbindRouteServiceRequest {
                service_instance,
                route: RouteRef::from(route),
            };
            services.unbind_route(&request).await?;
            output::print_status(
                &format!(
                    "Route unbound from service instance {}",
                    request.service_instance
                ),
                global.quiet,
            );
        }
    }
    Ok(())
}
