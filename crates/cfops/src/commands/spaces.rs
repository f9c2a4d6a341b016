//! Space command handlers.

use tabled::Tabled;

use cfops_core::{Operations, SpaceDetail, SpaceSummary};

use crate::cli::{GlobalOpts, SpacesArgs, SpacesCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SpaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "GUID")]
    id: String,
}

impl From<&SpaceSummary> for SpaceRow {
    fn from(s: &SpaceSummary) -> Self {
        Self {
            name: s.name.clone(),
            id: s.id.clone(),
        }
    }
}

fn detail(s: &SpaceDetail) -> Vec<(&'static str, String)> {
    vec![
        ("Name", s.name.clone()),
        ("GUID", s.id.clone()),
        ("Org", s.organization.clone()),
        ("SSH", output::or_dash(s.allow_ssh)),
        ("Apps", output::join_or_dash(&s.applications)),
        ("Services", output::join_or_dash(&s.services)),
    ]
}

pub async fn handle(
    ops: &Operations,
    args: SpacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let out = match args.command {
        SpacesCommand::List => {
            let spaces = ops.spaces().list().await?;
            output::render_list(&global.output, &spaces, |s| SpaceRow::from(s), |s| s.name.clone())
        }
        SpacesCommand::Get { name } => {
            let space = ops.spaces().get(&name).await?;
            output::render_single(
                &global.output,
                &space,
                detail,
                |s| s.id.clone(),
                output::should_color(&global.color),
            )
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
