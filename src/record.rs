//! Normalized output record.
//!
//! This module provides [`NormalizedRecord`], the canonical
//! `(timestamp, sender, message)` tuple every export dialect converges to.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use kakaopack::NormalizedRecord;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 8, 1)
//!     .unwrap()
//!     .and_hms_opt(15, 45, 0)
//!     .unwrap();
//! let record = NormalizedRecord::new(ts, "Alice", "hello");
//!
//! assert_eq!(record.date_string(), "2023-08-01 15:45:00");
//! assert_eq!(record.sender(), "Alice");
//! ```
//!
//! ## Serialization
//!
//! Records serialize with the tabular column names `Date`, `User` and
//! `Message`, in that order:
//!
//! ```
//! # use chrono::NaiveDate;
//! # use kakaopack::NormalizedRecord;
//! let ts = NaiveDate::from_ymd_opt(2023, 8, 2).unwrap().and_hms_opt(9, 5, 30).unwrap();
//! let record = NormalizedRecord::new(ts, "Bob", "hi");
//! let json = serde_json::to_string(&record)?;
//!
//! assert_eq!(json, r#"{"Date":"2023-08-02 09:05:30","User":"Bob","Message":"hi"}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format of the `Date` column: 24-hour clock, zero-padded, second precision.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tabular column names, in output order.
pub const COLUMNS: [&str; 3] = ["Date", "User", "Message"];

/// A single normalized chat line.
///
/// The timestamp is always fully specified: the normalizer never emits a
/// record for a line whose date could not be resolved.
///
/// | Field | Column | Description |
/// |-------|--------|-------------|
/// | `timestamp` | `Date` | Calendar date and time of day, second precision |
/// | `sender` | `User` | Display name as written in the export |
/// | `message` | `Message` | Message text, possibly empty |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// When the message was sent (export-local time, no zone).
    #[serde(rename = "Date", with = "date_column")]
    pub timestamp: NaiveDateTime,

    /// Display name of the message author.
    #[serde(rename = "User")]
    pub sender: String,

    /// Message text. Commas and quotes are kept verbatim; escaping is the
    /// writer's job.
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl NormalizedRecord {
    /// Creates a new record.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            message: message.into(),
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date portion of the timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the `Date` column value (`YYYY-MM-DD HH:MM:SS`).
    pub fn date_string(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    /// Returns the three column values in output order.
    pub fn to_row(&self) -> [String; 3] {
        [
            self.date_string(),
            self.sender.clone(),
            self.message.clone(),
        ]
    }
}

/// Serde adapter for the `Date` column.
mod date_column {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
