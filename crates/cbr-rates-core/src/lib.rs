//! # cbr-rates core
//!
//! Fetches the Central Bank of Russia's daily exchange-rate feed, parses it
//! into an immutable [`Snapshot`], and answers lookups through a
//! [`RateCatalog`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Catalog holding the current snapshot, queries and refresh |
//! | [`config`] | Feed URL and timeout configuration |
//! | [`domain`] | `CurrencyRecord` and `Snapshot` |
//! | [`error`] | Error types |
//! | [`feed`] | XML feed parsing |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`rate_source`] | `RateSource` trait and the bank implementation |
//! | [`retry`] | Caller-side retry policy |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cbr_rates_core::{CbrRateSource, FeedConfig, RateCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CbrRateSource::new(FeedConfig::from_env()?);
//!     let catalog = RateCatalog::load(Arc::new(source)).await?;
//!
//!     for (code, name) in catalog.list_currencies().await {
//!         println!("{code}  {name}");
//!     }
//!     println!("{}", catalog.rate_text("EUR").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use cbr_rates_core::{RateError, RateErrorKind};
//!
//! fn describe(error: &RateError) -> &'static str {
//!     match error.kind() {
//!         RateErrorKind::SourceUnavailable => "feed unreachable, try again later",
//!         RateErrorKind::MalformedDocument => "feed returned something unexpected",
//!         RateErrorKind::UnknownCode => "no such currency today",
//!         RateErrorKind::RefreshInProgress => "already refreshing",
//!     }
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod rate_source;
pub mod retry;

pub use catalog::RateCatalog;
pub use config::{FeedConfig, DEFAULT_FEED_URL, DEFAULT_TIMEOUT_MS};
pub use domain::{CurrencyRecord, Snapshot};
pub use error::{ConfigError, RateError, RateErrorKind, ValidationError};
pub use feed::parse_feed;
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
pub use rate_source::{CbrRateSource, RateSource};
pub use retry::{retry_load, retry_refresh, with_retry, Backoff, RetryConfig};
