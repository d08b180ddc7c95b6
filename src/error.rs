//! Unified error types for kakaopack.
//!
//! This module provides a single [`KakaopackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! Line classification never fails: a line that matches no dialect is simply
//! dropped. Errors only come from the edges of the library:
//!
//! - reading input files and writing output ([`KakaopackError::Io`])
//! - locale configuration ([`KakaopackError::InvalidLocale`])
//! - date-range arguments ([`KakaopackError::InvalidDate`], [`KakaopackError::InvalidDateRange`])
//! - reading back a normalized CSV ([`KakaopackError::InvalidRecord`])
//! - a non-empty file that produced no records ([`KakaopackError::UnsupportedFormat`])

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for kakaopack operations.
///
/// # Example
///
/// ```rust
/// use kakaopack::error::Result;
/// use kakaopack::NormalizedRecord;
///
/// fn my_function() -> Result<Vec<NormalizedRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, KakaopackError>;

/// The error type for all kakaopack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KakaopackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A non-empty export produced zero records.
    ///
    /// None of the lines matched a known KakaoTalk export dialect, or every
    /// time-only line appeared before any date was established.
    #[error("Unsupported export format{}: no line matched a known KakaoTalk dialect", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    UnsupportedFormat {
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file format doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Locale configuration is unusable.
    ///
    /// Raised for empty or ambiguous marker tokens, or when the dialect
    /// patterns built from the locale fail to compile.
    #[error("Invalid locale configuration: {message}")]
    InvalidLocale {
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in a date-range argument.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The start of a date range lies after its end.
    #[error("Start date {start} must not be later than end date {end}")]
    InvalidDateRange {
        /// Requested start date
        start: String,
        /// Requested end date
        end: String,
    },

    /// A row of a normalized CSV could not be read back.
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord {
        /// 1-based data row (header excluded)
        row: usize,
        /// Description of what's wrong
        message: String,
    },

    /// CSV reading or writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Locale file could not be parsed.
    #[cfg(feature = "toml-config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<regex::Error> for KakaopackError {
    fn from(err: regex::Error) -> Self {
        KakaopackError::InvalidLocale {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KakaopackError {
    /// Creates an unsupported-format error for the given file.
    pub fn unsupported(path: Option<PathBuf>) -> Self {
        KakaopackError::UnsupportedFormat { path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        KakaopackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid locale error.
    pub fn invalid_locale(message: impl Into<String>) -> Self {
        KakaopackError::InvalidLocale {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        KakaopackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid date range error.
    pub fn invalid_date_range(start: impl ToString, end: impl ToString) -> Self {
        KakaopackError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(row: usize, message: impl Into<String>) -> Self {
        KakaopackError::InvalidRecord {
            row,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KakaopackError::Io(_))
    }

    /// Returns `true` if the input was not a recognizable export.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, KakaopackError::UnsupportedFormat { .. })
    }

    /// Returns `true` if this is a date or date-range error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            KakaopackError::InvalidDate { .. } | KakaopackError::InvalidDateRange { .. }
        )
    }

    /// Returns `true` if this is a locale configuration error.
    pub fn is_invalid_locale(&self) -> bool {
        matches!(self, KakaopackError::InvalidLocale { .. })
    }
}
