//! Query surface over the current [`Snapshot`].

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::rate_source::RateSource;
use crate::{CurrencyRecord, RateError, Snapshot};

/// Holds the latest snapshot and answers lookups against it.
///
/// A catalog only exists once a first fetch has succeeded, so every query
/// runs against a valid snapshot. Readers clone the current `Arc<Snapshot>`
/// and never observe a half-applied refresh.
pub struct RateCatalog {
    source: Arc<dyn RateSource>,
    snapshot: RwLock<Arc<Snapshot>>,
    refresh_gate: Mutex<()>,
}

impl RateCatalog {
    /// Fetch the first snapshot from `source`.
    ///
    /// # Errors
    ///
    /// Propagates the source's error unchanged; no catalog is produced.
    pub async fn load(source: Arc<dyn RateSource>) -> Result<Self, RateError> {
        let snapshot = source.fetch_snapshot().await?;
        tracing::info!(currencies = snapshot.len(), "rate catalog loaded");

        Ok(Self {
            source,
            snapshot: RwLock::new(Arc::new(snapshot)),
            refresh_gate: Mutex::new(()),
        })
    }

    /// The current point-in-time view.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// `(code, display_name)` pairs in feed order.
    pub async fn list_currencies(&self) -> Vec<(String, String)> {
        self.snapshot().await.currencies()
    }

    /// Formatted rate line for `code`, e.g. `"1 Евро = 95.5 руб."`.
    ///
    /// # Errors
    ///
    /// [`RateError::UnknownCode`] when the current snapshot has no such code.
    pub async fn rate_text(&self, code: &str) -> Result<String, RateError> {
        self.snapshot().await.rate_text(code)
    }

    pub async fn record(&self, code: &str) -> Result<CurrencyRecord, RateError> {
        self.snapshot()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| RateError::UnknownCode(code.to_owned()))
    }

    /// Fetch again and swap in the new snapshot.
    ///
    /// On failure the previous snapshot stays in place. A refresh issued while
    /// another is running fails with [`RateError::RefreshInProgress`].
    pub async fn refresh(&self) -> Result<(), RateError> {
        let _guard = self
            .refresh_gate
            .try_lock()
            .map_err(|_| RateError::RefreshInProgress)?;

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                let count = snapshot.len();
                *self.snapshot.write().await = Arc::new(snapshot);
                tracing::info!(currencies = count, "rate snapshot replaced");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(error = %error, "refresh failed; keeping previous snapshot");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex as StdMutex;

    use super::*;

    struct Scripted(StdMutex<Vec<Result<Snapshot, RateError>>>);

    impl Scripted {
        fn new(mut outcomes: Vec<Result<Snapshot, RateError>>) -> Arc<Self> {
            outcomes.reverse();
            Arc::new(Self(StdMutex::new(outcomes)))
        }
    }

    impl RateSource for Scripted {
        fn fetch_snapshot<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = Result<Snapshot, RateError>> + Send + 'a>> {
            let next = self
                .0
                .lock()
                .expect("script lock")
                .pop()
                .expect("script exhausted");
            Box::pin(async move { next })
        }
    }

    fn snapshot(entries: &[(&str, &str, f64)]) -> Snapshot {
        let records = entries
            .iter()
            .map(|(code, name, rate)| CurrencyRecord::new(*name, *code, "1", *rate).expect("valid"))
            .collect();
        Snapshot::new(records, None).expect("valid snapshot")
    }

    #[tokio::test]
    async fn load_failure_is_propagated() {
        let source = Scripted::new(vec![Err(RateError::unavailable("offline"))]);
        let result = RateCatalog::load(source).await;
        assert!(matches!(result, Err(RateError::SourceUnavailable { .. })));
    }

    #[tokio::test]
    async fn single_entry_example() {
        let source = Scripted::new(vec![Ok(snapshot(&[("EUR", "Евро", 95.5)]))]);
        let catalog = RateCatalog::load(source).await.expect("load");

        assert_eq!(
            catalog.list_currencies().await,
            vec![(String::from("EUR"), String::from("Евро"))]
        );
        assert_eq!(
            catalog.rate_text("EUR").await.expect("known code"),
            "1 Евро = 95.5 руб."
        );
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let source = Scripted::new(vec![
            Ok(snapshot(&[("USD", "Доллар США", 80.0)])),
            Err(RateError::malformed("truncated")),
        ]);
        let catalog = RateCatalog::load(source).await.expect("load");

        let err = catalog.refresh().await.expect_err("refresh must fail");
        assert_eq!(err, RateError::malformed("truncated"));
        assert_eq!(
            catalog.rate_text("USD").await.expect("still there"),
            "1 Доллар США = 80 руб."
        );
    }
}
