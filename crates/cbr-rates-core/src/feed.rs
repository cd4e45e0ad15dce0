//! Parsing of the bank's `XML_daily` document.
//!
//! The feed looks like:
//!
//! ```xml
//! <ValCurs Date="16.10.2026" name="Foreign Currency Market">
//!   <Valute ID="R01239">
//!     <NumCode>978</NumCode>
//!     <CharCode>EUR</CharCode>
//!     <Nominal>1</Nominal>
//!     <Name>Евро</Name>
//!     <Value>95,5000</Value>
//!     <VunitRate>95,5</VunitRate>
//!   </Valute>
//! </ValCurs>
//! ```
//!
//! Parsing is all-or-nothing: any bad entry fails the whole document.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::domain::{parse_feed_date, parse_rate_value};
use crate::{CurrencyRecord, RateError, Snapshot, ValidationError};

const ROOT_ELEMENT: &str = "ValCurs";

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "@Date", default)]
    date: Option<String>,
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

// Required fields are optional here so a missing one can be reported by name.
#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "@ID", default)]
    id: Option<String>,
    #[serde(rename = "NumCode", default)]
    num_code: Option<String>,
    #[serde(rename = "CharCode", default)]
    char_code: Option<String>,
    #[serde(rename = "Nominal", default)]
    nominal: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Parse a complete feed document into a [`Snapshot`].
pub fn parse_feed(xml: &str) -> Result<Snapshot, RateError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    check_document(xml)?;

    let document: ValCurs = quick_xml::de::from_str(xml)
        .map_err(|e| RateError::malformed(format!("invalid feed structure: {e}")))?;

    let published_on = document
        .date
        .as_deref()
        .map(parse_feed_date)
        .transpose()
        .map_err(|e| RateError::malformed(e.to_string()))?;

    let records = document
        .valutes
        .into_iter()
        .enumerate()
        .map(|(index, valute)| to_record(index, valute))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        count = records.len(),
        published_on = ?published_on,
        "parsed rate feed"
    );

    Snapshot::new(records, published_on).map_err(|e| RateError::malformed(e.to_string()))
}

fn to_record(index: usize, valute: Valute) -> Result<CurrencyRecord, RateError> {
    let entry_error = |e: ValidationError| RateError::malformed(format!("entry {index}: {e}"));

    let name = required(index, "Name", valute.name)?;
    let nominal = required(index, "Nominal", valute.nominal)?;
    let code = required(index, "CharCode", valute.char_code)?;
    let raw_value = required(index, "Value", valute.value)?;

    let rate_value = parse_rate_value(&raw_value).map_err(entry_error)?;
    let mut record = CurrencyRecord::new(name, code, nominal, rate_value).map_err(entry_error)?;

    if let Some(num_code) = valute.num_code.filter(|value| !value.trim().is_empty()) {
        record = record.with_num_code(num_code.trim());
    }
    if let Some(id) = valute.id.filter(|value| !value.trim().is_empty()) {
        record = record.with_feed_id(id.trim());
    }
    Ok(record)
}

fn required(index: usize, field: &str, value: Option<String>) -> Result<String, RateError> {
    value.ok_or_else(|| RateError::malformed(format!("entry {index}: missing <{field}>")))
}

/// Walk the whole document once: it must be well formed with exactly one
/// `<ValCurs>` root and only whitespace, comments or declarations around it.
fn check_document(xml: &str) -> Result<(), RateError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(RateError::malformed(format!(
                    "not well-formed XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        };

        let (element, opens) = match event {
            Event::Start(element) => (element, true),
            Event::Empty(element) => (element, false),
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(RateError::malformed("text outside the root element"))
            }
            Event::CData(_) if depth == 0 => {
                return Err(RateError::malformed("text outside the root element"))
            }
            Event::Eof if depth > 0 => {
                return Err(RateError::malformed("document ends inside an open element"))
            }
            Event::Eof if !seen_root => {
                return Err(RateError::malformed("document has no root element"))
            }
            Event::Eof => return Ok(()),
            _ => continue,
        };

        if depth == 0 {
            let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
            if seen_root {
                return Err(RateError::malformed(format!(
                    "unexpected <{name}> after the root element"
                )));
            }
            if name != ROOT_ELEMENT {
                return Err(RateError::malformed(format!(
                    "expected root element <{ROOT_ELEMENT}>, found <{name}>"
                )));
            }
            seen_root = true;
        }
        if opens {
            depth += 1;
        }
    }
}
