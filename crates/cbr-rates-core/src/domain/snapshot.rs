use std::collections::HashMap;

use time::macros::format_description;
use time::Date;

use crate::{CurrencyRecord, RateError, ValidationError};

/// Records captured by one fetch, in feed order.
///
/// A snapshot never changes after construction; the catalog replaces it
/// wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    records: Vec<CurrencyRecord>,
    by_code: HashMap<String, usize>,
    published_on: Option<Date>,
}

impl Snapshot {
    pub fn new(
        records: Vec<CurrencyRecord>,
        published_on: Option<Date>,
    ) -> Result<Self, ValidationError> {
        let mut by_code = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_code.insert(record.code.clone(), index).is_some() {
                return Err(ValidationError::DuplicateCode {
                    code: record.code.clone(),
                });
            }
        }

        Ok(Self {
            records,
            by_code,
            published_on,
        })
    }

    pub fn records(&self) -> &[CurrencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date the bank published these rates for, when the feed states one.
    pub const fn published_on(&self) -> Option<Date> {
        self.published_on
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, code: &str) -> Option<&CurrencyRecord> {
        self.by_code.get(code).map(|&index| &self.records[index])
    }

    pub fn currencies(&self) -> Vec<(String, String)> {
        self.records
            .iter()
            .map(|record| (record.code.clone(), record.display_name.clone()))
            .collect()
    }

    pub fn rate_text(&self, code: &str) -> Result<String, RateError> {
        self.get(code)
            .map(CurrencyRecord::rate_text)
            .ok_or_else(|| RateError::UnknownCode(code.to_owned()))
    }
}

/// Parse the `Date` attribute of the feed root, e.g. `16.10.2026`.
pub fn parse_feed_date(raw: &str) -> Result<Date, ValidationError> {
    let format = format_description!("[day].[month].[year]");
    Date::parse(raw.trim(), &format).map_err(|_| ValidationError::InvalidDate {
        value: raw.to_owned(),
    })
}
