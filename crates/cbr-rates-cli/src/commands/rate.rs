use cbr_rates_core::{CurrencyRecord, RateCatalog, RateError};
use serde::Serialize;

use crate::cli::RateArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RateEntry {
    #[serde(flatten)]
    record: CurrencyRecord,
    text: String,
}

#[derive(Debug, Serialize)]
struct RateResponseData {
    published_on: Option<String>,
    rates: Vec<RateEntry>,
}

pub async fn run(args: &RateArgs, catalog: &RateCatalog) -> Result<CommandResult, CliError> {
    // One snapshot for every code, so a concurrent refresh cannot mix days.
    let snapshot = catalog.snapshot().await;

    let rates = args
        .codes
        .iter()
        .map(|code| {
            snapshot
                .get(code)
                .map(|record| RateEntry {
                    text: record.rate_text(),
                    record: record.clone(),
                })
                .ok_or_else(|| RateError::UnknownCode(code.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lines = rates.iter().map(|entry| entry.text.clone()).collect();
    let data = serde_json::to_value(RateResponseData {
        published_on: snapshot.published_on().map(|date| date.to_string()),
        rates,
    })?;
    Ok(CommandResult::new(data, lines))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cbr_rates_core::{CbrRateSource, FeedConfig, StaticHttpClient};

    use super::*;

    const FEED: &str = r#"<ValCurs Date="16.10.2026">
        <Valute><CharCode>EUR</CharCode><Nominal>1</Nominal><Name>Евро</Name><Value>95,5</Value></Valute>
        <Valute><CharCode>JPY</CharCode><Nominal>100</Nominal><Name>Японских иен</Name><Value>61,9731</Value></Valute>
    </ValCurs>"#;

    async fn catalog() -> RateCatalog {
        let client = Arc::new(StaticHttpClient::ok(FEED));
        let source = CbrRateSource::with_http_client(FeedConfig::default(), client);
        RateCatalog::load(Arc::new(source)).await.expect("initial load")
    }

    fn args(codes: &[&str]) -> RateArgs {
        RateArgs {
            codes: codes.iter().map(|code| (*code).to_owned()).collect(),
        }
    }

    #[tokio::test]
    async fn renders_each_requested_code() {
        let catalog = catalog().await;

        let result = run(&args(&["JPY", "EUR"]), &catalog).await.expect("known codes");

        assert_eq!(
            result.lines,
            vec!["100 Японских иен = 61.9731 руб.", "1 Евро = 95.5 руб."]
        );
        assert_eq!(result.data["published_on"], "2026-10-16");
    }

    #[tokio::test]
    async fn codes_are_matched_exactly() {
        let catalog = catalog().await;

        for code in [" EUR", "eur", "EUR "] {
            let err = run(&args(&[code]), &catalog).await.err().expect("no match");
            assert!(
                matches!(err, CliError::Rate(RateError::UnknownCode(ref c)) if c == code),
                "{code:?}: {err:?}"
            );
        }
    }
}
