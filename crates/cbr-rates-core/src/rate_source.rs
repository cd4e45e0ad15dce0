//! Rate source contract and the Central Bank implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::feed::parse_feed;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{FeedConfig, RateError, Snapshot};

/// Anything that can produce a fresh [`Snapshot`].
///
/// # Errors
///
/// Implementations return [`RateError::SourceUnavailable`] for transport
/// failures and [`RateError::MalformedDocument`] for unusable payloads. They
/// must not retry internally; retry policy belongs to the caller.
pub trait RateSource: Send + Sync {
    fn fetch_snapshot<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot, RateError>> + Send + 'a>>;
}

/// Fetches the bank's daily XML feed over HTTP.
#[derive(Clone)]
pub struct CbrRateSource {
    config: FeedConfig,
    http_client: Arc<dyn HttpClient>,
}

impl CbrRateSource {
    /// Source using the reqwest transport configured from `config`.
    pub fn new(config: FeedConfig) -> Self {
        let http_client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        Self {
            config,
            http_client,
        }
    }

    pub fn with_http_client(config: FeedConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    async fn fetch(&self) -> Result<Snapshot, RateError> {
        let request = HttpRequest::get(&self.config.url)
            .with_header("accept", "application/xml, text/xml")
            .with_timeout_ms(self.config.timeout_ms);

        tracing::debug!(url = %self.config.url, timeout_ms = self.config.timeout_ms, "fetching rate feed");

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                RateError::unavailable(format!(
                    "timed out after {}ms: {}",
                    self.config.timeout_ms,
                    e.message()
                ))
            } else {
                RateError::unavailable(format!("transport error: {}", e.message()))
            }
        })?;

        if !response.is_success() {
            let message = format!("feed returned status {}", response.status);
            // Server-side and throttling statuses may clear up; client errors will not.
            return Err(if response.status >= 500 || response.status == 429 {
                RateError::unavailable(message)
            } else {
                RateError::unavailable_permanent(message)
            });
        }

        parse_feed(&response.body)
    }
}

impl RateSource for CbrRateSource {
    fn fetch_snapshot<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot, RateError>> + Send + 'a>> {
        Box::pin(self.fetch())
    }
}
