//! # Kakaopack
//!
//! A Rust library for normalizing KakaoTalk chat exports into a uniform
//! `(Date, User, Message)` table.
//!
//! ## Overview
//!
//! KakaoTalk writes a different text layout depending on the client that
//! produced the export:
//! - **iOS** - `2023. 8. 1. 오후 3:45:12, Alice : hello`
//! - **Android** - `2023년 8월 1일 오후 3:45, Alice : hello`
//! - **Windows** - `[Alice] [오후 3:45] hi`, with the date announced by
//!   separator lines such as `--------------- 2023년 8월 1일 화요일 ---------------`
//!
//! The library classifies every line, converts the 12-hour clock to 24-hour
//! time, carries the last known date forward for desktop lines, and outputs
//! records in a single shape for masking, date filtering and analysis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kakaopack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let normalizer = LogNormalizer::new();
//!     let records = normalizer.normalize_file("KakaoTalk_Chat.txt".as_ref())?;
//!
//!     // Keep August and join the messages for analysis
//!     let range = DateRange::parse("2023-08-01", "2023-08-31")?;
//!     let text = extract_conversation_text(&records, &range, "\n");
//!     let excerpt = latest_conversation(&text, "\n", DEFAULT_EXCERPT_SEGMENTS);
//!
//!     write_csv(&records, "normalized.csv")?;
//!     println!("{excerpt}");
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! use kakaopack::normalizer::LogNormalizer;
//!
//! let normalizer = LogNormalizer::new();
//! for result in normalizer.stream_file("huge_export.txt".as_ref())? {
//!     let record = result?;
//!     println!("{}: {}", record.sender, record.message);
//! }
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`normalizer`] - [`LogNormalizer`](normalizer::LogNormalizer), carried
//!   [`ParserState`](normalizer::ParserState), [`NormalizeReport`](normalizer::NormalizeReport)
//! - [`parsing`] - Dialect classification and clock conversion
//! - [`record`] - [`NormalizedRecord`]
//! - [`config`] - [`LocaleConfig`](config::LocaleConfig), [`NormalizerConfig`](config::NormalizerConfig)
//! - [`core`] - Stages after normalization
//!   - [`core::filter`] - [`DateRange`](core::DateRange), [`extract_conversation_text`](core::extract_conversation_text)
//!   - [`core::excerpt`] - [`latest_conversation`](core::latest_conversation)
//!   - [`core::stages`] - [`RecordMasker`](core::RecordMasker), [`ConversationAnalyzer`](core::ConversationAnalyzer)
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - `streaming` - [`RecordStream`](streaming::RecordStream) for large files
//! - [`error`] - Unified error types ([`KakaopackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod normalizer;
pub mod parsing;
pub mod record;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{KakaopackError, Result};
pub use record::NormalizedRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use kakaopack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::NormalizedRecord;

    pub use crate::error::{KakaopackError, Result};

    pub use crate::config::{LocaleConfig, NormalizerConfig};
    pub use crate::normalizer::{ExportKind, LogNormalizer, NormalizeReport, ParserState};
    pub use crate::parsing::{Dialect, FormatMatch};

    pub use crate::core::excerpt::{DEFAULT_EXCERPT_SEGMENTS, latest_conversation};
    pub use crate::core::filter::{DateRange, extract_conversation_text};
    pub use crate::core::stages::{
        AnalysisResult, ConversationAnalyzer, IdentityMasker, RecordMasker, prepare_conversation,
    };

    #[cfg(feature = "csv-output")]
    pub use crate::core::input::read_csv;
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::OutputFormat;

    #[cfg(feature = "streaming")]
    pub use crate::streaming::RecordStream;
}
