//! CLI argument definitions for cbr-rates.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | List currencies in today's feed |
//! | `rate` | Show the rate line for one or more codes |
//! | `shell` | Interactive selection loop with refresh |
//!
//! # Examples
//!
//! ```bash
//! cbr-rates list
//! cbr-rates rate EUR USD
//! cbr-rates rate CNY --format json --pretty
//! cbr-rates --retries 3 shell
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Daily exchange rates from the Central Bank of Russia.
#[derive(Debug, Parser)]
#[command(name = "cbr-rates", author, version, about)]
pub struct Cli {
    /// Feed URL (defaults to CBR_RATES_URL or the bank's XML_daily endpoint).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in milliseconds (defaults to CBR_RATES_TIMEOUT_MS or 10000).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retry attempts when the feed is unreachable.
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines.
    Table,
    /// Single JSON document.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all currencies in feed order.
    List,

    /// Show the rate for one or more currency codes.
    ///
    /// Codes are matched exactly (EUR, not eur).
    Rate(RateArgs),

    /// Pick currencies interactively; `r` refreshes, `q` quits.
    Shell,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Currency codes such as EUR, USD, CNY.
    #[arg(required = true, num_args = 1..)]
    pub codes: Vec<String>,
}
