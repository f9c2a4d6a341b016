//! Domain command handlers.

use tabled::Tabled;

use cfops_core::{DomainSummary, Operations};

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "GUID")]
    id: String,
}

impl From<&DomainSummary> for DomainRow {
    fn from(d: &DomainSummary) -> Self {
        Self {
            name: d.name.clone(),
            kind: d.kind.to_string(),
            id: d.id.clone(),
        }
    }
}

pub async fn handle(
    ops: &Operations,
    args: DomainsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List => {
            let domains = ops.domains().list().await?;
            let out = output::render_list(&global.output, &domains, |d| DomainRow::from(d), |d| {
                d.name.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
