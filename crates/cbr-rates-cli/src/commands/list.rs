use cbr_rates_core::RateCatalog;
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CurrencyEntry {
    code: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct ListResponseData {
    published_on: Option<String>,
    currencies: Vec<CurrencyEntry>,
}

pub async fn run(catalog: &RateCatalog) -> Result<CommandResult, CliError> {
    let snapshot = catalog.snapshot().await;
    let published_on = snapshot.published_on().map(|date| date.to_string());

    let mut lines = Vec::with_capacity(snapshot.len() + 1);
    if let Some(date) = &published_on {
        lines.push(format!("rates for {date}"));
    }
    let currencies = snapshot
        .currencies()
        .into_iter()
        .map(|(code, name)| {
            lines.push(format!("{code:<4} {name}"));
            CurrencyEntry { code, name }
        })
        .collect();

    let data = serde_json::to_value(ListResponseData {
        published_on,
        currencies,
    })?;
    Ok(CommandResult::new(data, lines))
}
