//! Filter records by date range and join their messages.
//!
//! This module provides [`DateRange`] for defining an inclusive calendar
//! range and [`extract_conversation_text`] for turning the records inside it
//! into a single text blob for analysis.
//!
//! # Example
//!
//! ```
//! use kakaopack::core::filter::{DateRange, extract_conversation_text};
//! use kakaopack::normalizer::LogNormalizer;
//!
//! # fn main() -> kakaopack::Result<()> {
//! let records = LogNormalizer::new().normalize([
//!     "2023. 7. 31. 오후 11:59, Alice : too early",
//!     "2023. 8. 1. 오전 9:00, Alice : good morning",
//!     "2023. 8. 2. 오후 11:59:59, Bob : good night",
//! ]);
//!
//! let range = DateRange::parse("2023-08-01", "2023-08-02")?;
//! let text = extract_conversation_text(&records, &range, "\n");
//!
//! assert_eq!(text, "good morning\ngood night");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Both ends are inclusive at date precision: every record on the end date
//!   is kept, whatever its time of day
//! - Record order is preserved

use chrono::{NaiveDate, NaiveDateTime};

use crate::NormalizedRecord;
use crate::error::KakaopackError;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, KakaopackError> {
        if start > end {
            return Err(KakaopackError::invalid_date_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidDate`] if either date is malformed and
    /// [`KakaopackError::InvalidDateRange`] if `start` is after `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kakaopack::core::filter::DateRange;
    ///
    /// assert!(DateRange::parse("2023-08-01", "2023-08-31").is_ok());
    /// assert!(DateRange::parse("2023-08-31", "2023-08-01").is_err());
    /// assert!(DateRange::parse("2023/08/01", "2023-08-31").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, KakaopackError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Returns the first day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if the timestamp falls on a day inside the range.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let date = ts.date();
        self.start <= date && date <= self.end
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, KakaopackError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| KakaopackError::invalid_date(date_str))
}

/// Returns the records whose timestamp falls inside `range`, in order.
pub fn filter_records<'a>(
    records: &'a [NormalizedRecord],
    range: &'a DateRange,
) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
    records.iter().filter(move |r| range.contains(r.timestamp))
}

/// Joins the `Message` fields of records inside `range` with `separator`.
pub fn extract_conversation_text(
    records: &[NormalizedRecord],
    range: &DateRange,
    separator: &str,
) -> String {
    filter_records(records, range)
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
