//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, resolves settings, and dispatches to
//! a handler. Handler errors become process exit codes.

use clap::{CommandFactory, Parser};

use mediagrab_cli::handlers::{self, watch::WatchArgs};
use mediagrab_cli::{Cli, CliError, Commands, bootstrap, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (MEDIAGRAB_SETTINGS, RUST_LOG)
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(cli.settings.as_deref(), command).await {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}

async fn run(settings: Option<&std::path::Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Watch {
            input,
            throttle_ms,
            no_monotonic,
            plain,
            json,
        } => {
            let ctx = bootstrap(settings)?;
            let args = WatchArgs {
                input,
                throttle_ms,
                no_monotonic,
                plain,
                json,
            };
            handlers::watch::execute(&ctx, args).await
        }
        Commands::Parse { line } => handlers::parse::execute(&line),
    }
}
