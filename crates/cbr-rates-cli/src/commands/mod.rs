mod list;
mod rate;
mod shell;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use cbr_rates_core::{retry_load, Backoff, CbrRateSource, FeedConfig, RateSource, RetryConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use shell::run_session;

/// Output of a one-shot command: JSON data plus its plain-text rendering.
pub struct CommandResult {
    pub data: Value,
    pub lines: Vec<String>,
}

impl CommandResult {
    pub fn new(data: Value, lines: Vec<String>) -> Self {
        Self { data, lines }
    }
}

/// Returns `None` for interactive commands that wrote their own output.
pub async fn run(cli: &Cli) -> Result<Option<CommandResult>, CliError> {
    let config = feed_config(cli)?;
    let retry = retry_config(cli.retries);
    let source: Arc<dyn RateSource> = Arc::new(CbrRateSource::new(config));
    let catalog = retry_load(source, &retry).await?;

    match &cli.command {
        Command::List => list::run(&catalog).await.map(Some),
        Command::Rate(args) => rate::run(args, &catalog).await.map(Some),
        Command::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_session(&catalog, &retry, stdin.lock(), stdout.lock()).await?;
            Ok(None)
        }
    }
}

fn feed_config(cli: &Cli) -> Result<FeedConfig, CliError> {
    let mut config = FeedConfig::from_env()?;
    if let Some(url) = &cli.url {
        config = config.with_url(url.trim());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    config.validate()?;
    tracing::debug!(url = %config.url, timeout_ms = config.timeout_ms, "feed configuration resolved");
    Ok(config)
}

fn retry_config(retries: u32) -> RetryConfig {
    if retries == 0 {
        return RetryConfig::no_retry();
    }
    RetryConfig {
        max_retries: retries,
        backoff: Backoff::Exponential {
            base: Duration::from_millis(500),
            factor: 2.0,
            max: Duration::from_secs(8),
            jitter: true,
        },
    }
}
