mod cli;
mod error;
mod output;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use ferroquote_core::{QuoteClientConfig, QuoteFetcher, QuoteService};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

const LOG_FORMAT_ENV: &str = "FERROQUOTE_LOG_FORMAT";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.exit()
        }
        Err(_) => return report(CliError::Usage, OutputFormat::Json),
    };

    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error, cli.format),
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = QuoteClientConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout(std::time::Duration::from_millis(timeout_ms));
    }

    let service = QuoteService::new(QuoteFetcher::new(config));
    let market_hint = cli.market_hint();
    let record = service.query(cli.ticker(), market_hint.as_deref()).await?;

    output::render_quote(&record, cli.format)
}

fn report(error: CliError, format: OutputFormat) -> ExitCode {
    tracing::debug!(%error, "query failed");
    if let Err(render_error) = output::render_error(&error.to_string(), format) {
        eprintln!("error: {error} ({render_error})");
    }
    ExitCode::from(error.exit_code())
}

/// Logs go to stderr so stdout only ever carries the record.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let registry = tracing_subscriber::registry().with(filter);

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
