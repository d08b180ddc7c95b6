//! Output format writers.
//!
//! Every writer emits the same three fields per record, named `Date`,
//! `User` and `Message`:
//! - [`write_csv`] / [`to_csv`] - comma-delimited CSV with a header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> kakaopack::Result<()> {
//! use kakaopack::core::output::{to_csv, write_csv, write_jsonl};
//! use kakaopack::normalizer::LogNormalizer;
//!
//! let records = LogNormalizer::new().normalize_str("2023. 8. 1. 오후 3:45, Alice : hello");
//!
//! write_csv(&records, "output.csv")?;
//! write_jsonl(&records, "output.jsonl")?;
//!
//! let csv_string = to_csv(&records)?;
//! assert!(csv_string.starts_with("Date,User,Message"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
