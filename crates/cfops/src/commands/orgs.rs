//! Organization command handlers.

use tabled::Tabled;

use cfops_core::{OrganizationDetail, OrganizationSummary, Operations};

use crate::cli::{GlobalOpts, OrgsArgs, OrgsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "GUID")]
    id: String,
}

impl From<&OrganizationSummary> for OrgRow {
    fn from(o: &OrganizationSummary) -> Self {
        Self {
            name: o.name.clone(),
            status: output::or_dash(o.status.as_deref()),
            id: o.id.clone(),
        }
    }
}

fn detail(o: &OrganizationDetail) -> Vec<(&'static str, String)> {
    vec![
        ("Name", o.name.clone()),
        ("GUID", o.id.clone()),
        ("Status", output::or_dash(o.status.as_deref())),
        ("Quota", output::or_dash(o.quota_definition_id.as_deref())),
        ("Spaces", output::join_or_dash(&o.spaces)),
    ]
}

pub async fn handle(ops: &Operations, args: OrgsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match args.command {
        OrgsCommand::List => {
            let orgs = ops.organizations().list().await?;
            output::render_list(&global.output, &orgs, |o| OrgRow::from(o), |o| o.name.clone())
        }
        OrgsCommand::Get { name } => {
            let org = ops.organizations().get(&name).await?;
            output::render_single(
                &global.output,
                &org,
                detail,
                |o| o.id.clone(),
                output::should_color(&global.color),
            )
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
