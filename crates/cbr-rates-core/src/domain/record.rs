use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One currency quoted against the ruble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub display_name: String,
    pub code: String,
    /// Quotation unit exactly as published, e.g. "1", "10", "10000".
    pub face_value: String,
    /// Rubles per `face_value` units.
    pub rate_value: f64,
    pub num_code: Option<String>,
    pub feed_id: Option<String>,
}

impl CurrencyRecord {
    pub fn new(
        display_name: impl Into<String>,
        code: impl Into<String>,
        face_value: impl Into<String>,
        rate_value: f64,
    ) -> Result<Self, ValidationError> {
        let display_name = non_empty("name", display_name.into())?;
        let code = non_empty("code", code.into())?;
        let face_value = non_empty("face_value", face_value.into())?;
        if !rate_value.is_finite() || rate_value < 0.0 {
            return Err(ValidationError::RateOutOfRange {
                value: rate_value.to_string(),
            });
        }

        Ok(Self {
            display_name,
            code,
            face_value,
            rate_value,
            num_code: None,
            feed_id: None,
        })
    }

    pub fn with_num_code(mut self, num_code: impl Into<String>) -> Self {
        self.num_code = Some(num_code.into());
        self
    }

    pub fn with_feed_id(mut self, feed_id: impl Into<String>) -> Self {
        self.feed_id = Some(feed_id.into());
        self
    }

    /// Human-readable rate line: `"<face_value> <display_name> = <rate_value> руб."`.
    pub fn rate_text(&self) -> String {
        self.to_string()
    }
}

impl Display for CurrencyRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // f64's Display is the shortest round-trip form, so "95,5000" prints as 95.5.
        write!(
            f,
            "{} {} = {} руб.",
            self.face_value, self.display_name, self.rate_value
        )
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Parse a rate written with either a decimal comma or a decimal point.
pub fn parse_rate_value(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field: "value" });
    }
    if trimmed.contains(',') && trimmed.contains('.') {
        return Err(ValidationError::InvalidRate {
            value: trimmed.to_owned(),
        });
    }

    let value = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidRate {
            value: trimmed.to_owned(),
        })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::RateOutOfRange {
            value: trimmed.to_owned(),
        });
    }
    Ok(value)
}
