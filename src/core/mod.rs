//! Stages that run after normalization.
//!
//! This module contains:
//! - [`filter`] - Date-range filtering and message joining
//! - [`excerpt`] - Trailing excerpt of a joined conversation
//! - [`stages`] - Masking and analysis interfaces
//! - [`input`] - Reading normalized CSV back into records
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use kakaopack::core::{
//!     DateRange, extract_conversation_text, latest_conversation,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod excerpt;
pub mod filter;
#[cfg(feature = "csv-output")]
pub mod input;
pub mod output;
pub mod stages;

pub use excerpt::{DEFAULT_EXCERPT_SEGMENTS, latest_conversation};
pub use filter::{DateRange, extract_conversation_text, filter_records};
pub use stages::{
    AnalysisResult, ConversationAnalyzer, IdentityMasker, PreparedConversation, RecordMasker,
    prepare_conversation,
};

#[cfg(feature = "csv-output")]
pub use input::{from_csv_str, read_csv};
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
