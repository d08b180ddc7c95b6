//! Reading normalized records back from CSV.
//!
//! Exports that were already converted, by this crate or by an earlier run of
//! the pipeline, enter as CSV with the `Date,User,Message` header and skip
//! classification entirely.

use std::path::Path;

use crate::NormalizedRecord;
use crate::error::{KakaopackError, Result};
use crate::record::COLUMNS;

/// Reads a normalized CSV file.
///
/// A leading UTF-8 byte-order mark is ignored.
///
/// # Errors
///
/// Returns [`KakaopackError::Io`] if the file cannot be read,
/// [`KakaopackError::InvalidFormat`] if the header is not `Date,User,Message`
/// and [`KakaopackError::InvalidRecord`] for a row whose date does not parse.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<NormalizedRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let records = from_csv_str(&content)?;
    tracing::info!(path = %path.display(), records = records.len(), "Loaded normalized CSV");
    Ok(records)
}

/// Parses normalized records from CSV text.
///
/// # Example
///
/// ```
/// use kakaopack::core::input::from_csv_str;
///
/// let records = from_csv_str("Date,User,Message\n2023-08-01 15:45:00,Alice,\"hi, there\"\n")?;
/// assert_eq!(records[0].message, "hi, there");
/// # Ok::<(), kakaopack::KakaopackError>(())
/// ```
pub fn from_csv_str(content: &str) -> Result<Vec<NormalizedRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?;
    if headers.iter().map(str::trim).ne(COLUMNS.iter().copied()) {
        return Err(KakaopackError::invalid_format(
            "csv",
            format!(
                "expected header '{}', found '{}'",
                COLUMNS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<NormalizedRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => return Err(KakaopackError::invalid_record(index + 1, err.to_string())),
        }
    }
    Ok(records)
}
