mod cli;
mod client;
mod commands;
mod config;
mod error;
mod export;
mod filters;
mod issues;
mod normalize;
mod output;
mod report;
mod responses;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use client::JiraClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "wkreport", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let debug = cli.debug || config.debug;
    init_tracing(debug);

    let client = JiraClient::new(
        &config.jira.url,
        &config.jira.email,
        &config.jira.api_token,
        debug,
    )?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    if cli.ls {
        return commands::filters::list(&client, &cancel).await;
    }

    let identifier = cli.filter.as_deref().map(str::trim).unwrap_or_default();
    if identifier.is_empty() {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "filter identifier (-f) is required",
            )
            .exit();
    }

    commands::report::run(&client, identifier, cli.output_mode(), &cancel).await
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(debug: bool) {
    let default_level = if debug { "wkreport=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}
