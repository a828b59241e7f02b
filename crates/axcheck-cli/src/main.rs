//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging and routes each command to its
//! handler. Only commands that read a device go through bootstrap.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use axcheck_cli::error::exit_code_for;
use axcheck_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    match cli.command {
        Commands::Tier { api_level } => handlers::tier::execute(api_level),
        Commands::Query { method, channel } => {
            let ctx = bootstrap(config)?;
            let result = handlers::query::execute(&ctx, &method, channel.as_deref()).await;
            ctx.session().shutdown().await;
            result
        }
        Commands::Report => {
            let ctx = bootstrap(config)?;
            let result = handlers::report::execute(&ctx).await;
            ctx.session().shutdown().await;
            result
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads AXCHECK_DEVICE
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = exit_code_for(&err);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
