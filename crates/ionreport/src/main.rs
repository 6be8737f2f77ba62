mod auth;
mod cli;
mod config;
mod error;
mod output;
mod report;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ionreport_core::{Controller, ReportOptions};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Run and handle errors with proper exit codes
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
    let cfg = config::load_config()?;
    let settings = config::resolve_settings(&cli, &cfg)?;

    // Resolve the token before any network I/O so a bad file fails fast
    let token = auth::resolve_token(cli.token.as_deref(), cli.token_file.as_deref(), |var| {
        std::env::var(var).ok()
    })?;

    let controller = Controller::new(&settings.controller)?;
    tracing::debug!(url = %settings.controller.url, "controller configured");

    let tenant_id = auth::authenticate(&controller, token, settings.max_login_attempts).await?;
    tracing::debug!(%tenant_id, "session bound to tenant");

    let options = ReportOptions {
        strict: settings.strict,
    };
    let result = report::run(
        &controller,
        &settings.csv_file,
        options,
        cli.quiet,
    )
    .await;

    // Always end the session; a logout failure never masks the report result
    if let Err(e) = controller.logout().await {
        warn!(error = %e, "logout failed");
    }

    result
}
