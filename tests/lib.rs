//! Shared fixtures for the behavior tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cbr_rates_core::{
    CbrRateSource, FeedConfig, HttpError, HttpResponse, RateCatalog, RateError, RateSource,
    Snapshot, StaticHttpClient,
};
use tokio::sync::Notify;

/// One `<Valute>` entry as the bank would publish it.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: &'static str,
    pub nominal: &'static str,
    pub code: &'static str,
    pub value: &'static str,
}

impl Entry {
    pub const fn new(
        name: &'static str,
        nominal: &'static str,
        code: &'static str,
        value: &'static str,
    ) -> Self {
        Self {
            name,
            nominal,
            code,
            value,
        }
    }
}

pub fn feed_xml(date: &str, entries: &[Entry]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"windows-1251\"?>\n<ValCurs Date=\"{date}\" name=\"Foreign Currency Market\">\n"
    );
    for (index, entry) in entries.iter().enumerate() {
        xml.push_str(&format!(
            "  <Valute ID=\"R{index:05}\"><NumCode>{index:03}</NumCode><CharCode>{}</CharCode><Nominal>{}</Nominal><Name>{}</Name><Value>{}</Value><VunitRate>0</VunitRate></Valute>\n",
            entry.code, entry.nominal, entry.name, entry.value
        ));
    }
    xml.push_str("</ValCurs>\n");
    xml
}

pub fn bank_source(outcomes: Vec<Result<HttpResponse, HttpError>>) -> Arc<dyn RateSource> {
    let client = Arc::new(StaticHttpClient::new(outcomes));
    let config = FeedConfig::default().with_url("http://feed.test/scripts/XML_daily.asp");
    Arc::new(CbrRateSource::with_http_client(config, client))
}

pub async fn catalog_from(outcomes: Vec<Result<HttpResponse, HttpError>>) -> RateCatalog {
    RateCatalog::load(bank_source(outcomes))
        .await
        .expect("initial load should succeed")
}

/// Source whose fetches after the first block until [`GatedSource::open`].
pub struct GatedSource {
    calls: AtomicUsize,
    gate: Notify,
    snapshots: Mutex<Vec<Snapshot>>,
}

impl GatedSource {
    pub fn new(first: Snapshot, later: Snapshot) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
            snapshots: Mutex::new(vec![later, first]),
        })
    }

    pub fn open(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RateSource for GatedSource {
    fn fetch_snapshot<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot, RateError>> + Send + 'a>> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call > 0 {
                self.gate.notified().await;
            }
            let mut snapshots = self.snapshots.lock().expect("snapshot lock");
            let next = if snapshots.len() > 1 {
                snapshots.pop()
            } else {
                snapshots.last().cloned()
            };
            next.ok_or_else(|| RateError::unavailable("gated source has nothing to serve"))
        })
    }
}
