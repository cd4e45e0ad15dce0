//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CurrencyRecord`] | One currency entry from the daily feed |
//! | [`Snapshot`] | Immutable, ordered set of records captured by one fetch |
//!
//! Both types validate their invariants at construction time, so a
//! [`Snapshot`] that exists always has unique codes and finite, non-negative
//! rates.

mod record;
mod snapshot;

pub use record::{parse_rate_value, CurrencyRecord};
pub use snapshot::{parse_feed_date, Snapshot};
