//! Application command handlers.

use tabled::Tabled;

use cfops_core::{ApplicationDetail, ApplicationSummary, DeleteApplicationRequest, Operations};

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Instances")]
    instances: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Disk")]
    disk: String,
}

impl From<&ApplicationSummary> for AppRow {
    fn from(a: &ApplicationSummary) -> Self {
        Self {
            name: a.name.clone(),
            state: a.state.to_string(),
            instances: output::or_dash(a.instances),
            memory: output::or_dash(a.memory_limit.map(|mb| format!("{mb}M"))),
            disk: output::or_dash(a.disk_quota.map(|mb| format!("{mb}M"))),
        }
    }
}

fn detail(a: &ApplicationDetail) -> Vec<(&'static str, String)> {
    let s = &a.summary;
    vec![
        ("Name", s.name.clone()),
        ("GUID", s.id.clone()),
        ("State", s.state.to_string()),
        ("Instances", output::or_dash(s.instances)),
        ("Memory", output::or_dash(s.memory_limit.map(|mb| format!("{mb}M")))),
        ("Disk", output::or_dash(s.disk_quota.map(|mb| format!("{mb}M")))),
        (
            "Buildpack",
            output::or_dash(a.buildpack.as_deref().or(a.detected_buildpack.as_deref())),
        ),
        ("Health check", output::or_dash(a.health_check_type.as_deref())),
        ("Package", output::or_dash(a.package_state.as_deref())),
        ("Routes", output::join_or_dash(&a.urls)),
    ]
}

pub async fn handle(ops: &Operations, args: AppsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        AppsCommand::List => {
            let apps = ops.applications().list().await?;
            let out =
                output::render_list(&global.output, &apps, |a| AppRow::from(a), |a| a.name.clone());
            output::print_output(&out, global.quiet);
        }

        AppsCommand::Get { name } => {
            let app = ops.applications().get(&name).await?;
            let out =
                output::render_single(&global.output, &app, detail, |a| a.summary.id.clone(), color);
            output::print_output(&out, global.quiet);
        }

        AppsCommand::Start { name } => {
            let app = ops.applications().start(&name).await?;
            output::print_status(&format!("Application {} is {}", app.name, app.state), global.quiet);
        }

        AppsCommand::Stop { name } => {
            let app = ops.applications().stop(&name).await?;
            output::print_status(&format!("Application {} is {}", app.name, app.state), global.quiet);
        }

        AppsCommand::Delete {
            name,
            delete_routes,
        } => {
            let prompt = if delete_routes {
                format!("Delete application '{name}' and its routes?")
            } else {
                format!("Delete application '{name}'?")
            };
            if !util::confirm(&prompt, "apps delete", global)? {
                return Ok(());
            }
            let request = DeleteApplicationRequest {
                name: name.clone(),
                delete_routes,
            };
            util::with_spinner(
                &format!("Deleting {name}"),
                global,
                ops.applications().delete(&request),
            )
            .await?;
            output::print_status(&format!("Application {name} deleted"), global.quiet);
        }
    }
    Ok(())
}
