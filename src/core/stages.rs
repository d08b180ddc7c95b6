//! Interfaces for the stages that consume normalized records.
//!
//! Name masking and conversation analysis live outside this crate. This
//! module fixes the shapes they exchange with it:
//!
//! - [`RecordMasker`] - record stream in, record stream of the same shape out
//! - [`ConversationAnalyzer`] - joined text in, [`AnalysisResult`] out
//! - [`prepare_conversation`] - mask, filter by date, join, and cut the
//!   trailing excerpt in one call
//!
//! # Example
//!
//! ```
//! use kakaopack::core::filter::DateRange;
//! use kakaopack::core::stages::{IdentityMasker, prepare_conversation};
//! use kakaopack::normalizer::LogNormalizer;
//!
//! # fn main() -> kakaopack::Result<()> {
//! let records = LogNormalizer::new().normalize(["2023. 8. 1. 오후 3:45, Alice : hello"]);
//! let range = DateRange::parse("2023-08-01", "2023-08-31")?;
//!
//! let prepared = prepare_conversation(records, &IdentityMasker, &range, "\n", 50);
//! assert_eq!(prepared.conversation_text, "hello");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::NormalizedRecord;
use crate::core::excerpt::latest_conversation;
use crate::core::filter::{DateRange, extract_conversation_text};

/// Replaces personal names in senders and message mentions.
///
/// Implementations must return one record per input record, in order.
pub trait RecordMasker {
    fn mask(&self, records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord>;
}

/// Masker that returns records unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMasker;

impl RecordMasker for IdentityMasker {
    fn mask(&self, records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
        records
    }
}

/// Output of a conversation analyzer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Relationship label the analyzer judged closest.
    pub closest_relation: String,
    /// Score per relationship label.
    pub final_scores: BTreeMap<String, f64>,
}

/// Semantic analysis over a joined conversation text.
pub trait ConversationAnalyzer {
    type Error: std::error::Error;

    fn analyze(&self, conversation_text: &str) -> Result<AnalysisResult, Self::Error>;
}

/// Masked records plus the text views derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedConversation {
    /// Masked records, all dates.
    pub records: Vec<NormalizedRecord>,
    /// Messages inside the date range, joined by the separator.
    pub conversation_text: String,
    /// Trailing excerpt of `conversation_text` for summarization.
    pub latest_excerpt: String,
}

/// Masks `records`, then builds the in-range text and its trailing excerpt.
pub fn prepare_conversation<M: RecordMasker + ?Sized>(
    records: Vec<NormalizedRecord>,
    masker: &M,
    range: &DateRange,
    separator: &str,
    excerpt_segments: usize,
) -> PreparedConversation {
    let records = masker.mask(records);
    let conversation_text = extract_conversation_text(&records, range, separator);
    let latest_excerpt = latest_conversation(&conversation_text, separator, excerpt_segments);

    tracing::debug!(
        records = records.len(),
        text_bytes = conversation_text.len(),
        excerpt_bytes = latest_excerpt.len(),
        "Prepared conversation"
    );

    PreparedConversation {
        records,
        conversation_text,
        latest_excerpt,
    }
}
