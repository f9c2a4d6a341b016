mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::future::Future;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use cfops_core::Operations;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a foundation connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "cfops", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config_or_default();
            let client_config = config::build_client_config(&cli.global, &cfg)?;

            // Ctrl-C interrupts whatever the command is doing. A job wait
            // sees the token itself and reports which job it left behind.
            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_signal.cancel();
                }
            });

            until_cancelled(&cancel, async {
                let ops = Operations::connect(&client_config)
                    .await?
                    .with_cancellation(cancel.clone());

                tracing::debug!(command = ?cmd, "dispatching command");
                commands::dispatch(cmd, &ops, &cli.global).await
            })
            .await
        }
    }
}

/// Drive `work` to completion unless `cancel` fires first.
async fn until_cancelled<F>(cancel: &CancellationToken, work: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    tokio::select! {
        biased;
        result = work => result,
        () = cancel.cancelled() => Err(CliError::Interrupted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_code;

    #[tokio::test]
    async fn cancellation_interrupts_pending_work() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = until_cancelled(&cancel, std::future::pending())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Interrupted));
        assert_eq!(err.exit_code(), exit_code::CANCELLED);
    }

    #[tokio::test]
    async fn job_cancellation_keeps_the_job_id() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = until_cancelled(&cancel, async {
            Err(CliError::Cancelled {
                job_id: "job-1".into(),
            })
        })
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Cancelled { job_id } if job_id == "job-1"));
    }

    #[tokio::test]
    async fn finished_work_passes_through() {
        let cancel = CancellationToken::new();
        until_cancelled(&cancel, async { Ok(()) }).await.unwrap();
    }
}
