//! KakaoTalk log normalizer.
//!
//! [`LogNormalizer`] turns the lines of a chat export into an ordered
//! sequence of [`NormalizedRecord`]s. It handles the three client dialects
//! plus the desktop date header, and carries the most recently established
//! date forward so that desktop lines (which only carry a time of day) can be
//! completed.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::normalizer::LogNormalizer;
//!
//! let normalizer = LogNormalizer::new();
//! let records = normalizer.normalize([
//!     "--------------- 2023년 8월 1일 화요일 ---------------",
//!     "[Alice] [오후 3:45] hi",
//!     "2023. 8. 2. 오전 9:05:30, Bob : hello",
//! ]);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].date_string(), "2023-08-01 15:45:00");
//! assert_eq!(records[1].date_string(), "2023-08-02 09:05:30");
//! ```
//!
//! # Skipped lines
//!
//! Classification never fails. A line produces no record when it:
//! - matches no dialect (continuation lines, export preamble, blank lines)
//! - is a desktop line and no date has been established yet
//! - carries digits that do not form a real date or time (`2023. 2. 30.`)
//!
//! A non-empty file that yields no records at all is reported through
//! [`NormalizeReport::is_unsupported`]; the file helpers turn that into
//! [`KakaopackError::UnsupportedFormat`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::NormalizedRecord;
use crate::config::NormalizerConfig;
use crate::error::KakaopackError;
use crate::parsing::{ClockTime, DateFields, Dialect, DialectSet, FormatMatch};

#[cfg(feature = "streaming")]
use crate::streaming::RecordStream;

const BOM: char = '\u{feff}';

/// Carry-forward state for one normalization run.
///
/// Holds the last established date-time. Mobile lines set it to their own
/// timestamp, date headers set it to midnight of their date, and desktop
/// lines read its date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserState {
    last_known: Option<NaiveDateTime>,
}

impl ParserState {
    /// Creates an empty state with no established date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last established date-time, if any.
    pub fn last_known(&self) -> Option<NaiveDateTime> {
        self.last_known
    }

    /// Returns the date desktop lines will be attached to, if any.
    pub fn last_known_date(&self) -> Option<NaiveDate> {
        self.last_known.map(|ts| ts.date())
    }

    fn establish(&mut self, ts: NaiveDateTime) {
        self.last_known = Some(ts);
    }
}

/// What a single line contributed to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line produced a record.
    Record(Dialect, NormalizedRecord),
    /// A date header moved the carried date.
    DateChanged(NaiveDate),
    /// A desktop line appeared before any date was established.
    Orphaned,
    /// The line matched a dialect but its fields are not a real date-time.
    InvalidTimestamp(Dialect),
    /// The line matched no dialect.
    Unmatched,
    /// The line was empty after trimming.
    Blank,
}

/// The client that most likely produced an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// iOS client (Mobile A lines)
    Ios,
    /// Android client (Mobile B lines)
    Android,
    /// Windows client (desktop lines and date headers)
    Windows,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::Ios => write!(f, "iOS"),
            ExportKind::Android => write!(f, "Android"),
            ExportKind::Windows => write!(f, "Windows"),
        }
    }
}

/// Line counts for one normalization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub records: usize,
    pub mobile_a: usize,
    pub mobile_b: usize,
    pub desktop: usize,
    pub date_headers: usize,
    pub unmatched: usize,
    pub orphaned: usize,
    pub invalid_timestamps: usize,
}

impl NormalizeReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one line.
    pub fn observe(&mut self, outcome: &LineOutcome) {
        self.total_lines += 1;
        let dialect = match outcome {
            LineOutcome::Record(dialect, _) => {
                self.records += 1;
                Some(*dialect)
            }
            LineOutcome::DateChanged(_) => Some(Dialect::DateHeader),
            LineOutcome::Orphaned => {
                self.orphaned += 1;
                Some(Dialect::Desktop)
            }
            LineOutcome::InvalidTimestamp(dialect) => {
                self.invalid_timestamps += 1;
                Some(*dialect)
            }
            LineOutcome::Unmatched => {
                self.unmatched += 1;
                None
            }
            LineOutcome::Blank => {
                self.blank_lines += 1;
                None
            }
        };
        match dialect {
            Some(Dialect::MobileA) => self.mobile_a += 1,
            Some(Dialect::MobileB) => self.mobile_b += 1,
            Some(Dialect::Desktop) => self.desktop += 1,
            Some(Dialect::DateHeader) => self.date_headers += 1,
            None => {}
        }
    }

    /// Returns `true` when a non-empty input produced no records.
    ///
    /// Callers should treat this as "not a KakaoTalk export".
    pub fn is_unsupported(&self) -> bool {
        self.records == 0 && self.total_lines > self.blank_lines
    }

    /// Guesses the producing client from dialect counts.
    ///
    /// Ties are broken in dialect precedence order. Returns `None` if no
    /// message line matched.
    pub fn export_kind(&self) -> Option<ExportKind> {
        let candidates = [
            (ExportKind::Ios, self.mobile_a),
            (ExportKind::Android, self.mobile_b),
            (ExportKind::Windows, self.desktop),
        ];
        let max = candidates.iter().map(|&(_, n)| n).max()?;
        if max == 0 {
            return None;
        }
        candidates
            .iter()
            .find(|&&(_, n)| n == max)
            .map(|&(kind, _)| kind)
    }
}

/// Normalizer for KakaoTalk text exports.
///
/// The normalizer itself is stateless; each call to [`normalize`](Self::normalize)
/// (or each [`RecordStream`](crate::streaming::RecordStream)) owns its own
/// [`ParserState`].
#[derive(Clone)]
pub struct LogNormalizer {
    config: NormalizerConfig,
    dialects: DialectSet,
}

impl LogNormalizer {
    /// Creates a normalizer for the default Korean locale.
    pub fn new() -> Self {
        Self::with_config(NormalizerConfig::default())
            .expect("built-in Korean locale compiles")
    }

    /// Creates a normalizer with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidLocale`] if the locale is unusable and
    /// [`KakaopackError::InvalidFormat`] if the buffer size is zero.
    pub fn with_config(config: NormalizerConfig) -> Result<Self, KakaopackError> {
        config.validate()?;
        let dialects = DialectSet::new(&config.locale)?;
        Ok(Self { config, dialects })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Returns the compiled dialect patterns.
    pub fn dialects(&self) -> &DialectSet {
        &self.dialects
    }

    /// Processes one raw line against the carried state.
    ///
    /// `first` marks the first line of the input, where a byte-order mark
    /// may be present.
    pub fn step(&self, state: &mut ParserState, line: &str, first: bool) -> LineOutcome {
        let line = if first && self.config.strip_bom {
            line.trim_start_matches(BOM)
        } else {
            line
        };
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Blank;
        }

        match self.dialects.classify(line) {
            FormatMatch::MobileA {
                date,
                time,
                sender,
                message,
            } => self.dated_record(state, Dialect::MobileA, date, time, sender, message),
            FormatMatch::MobileB {
                date,
                time,
                sender,
                message,
            } => self.dated_record(state, Dialect::MobileB, date, time, sender, message),
            FormatMatch::Desktop {
                time,
                sender,
                message,
            } => {
                let Some(date) = state.last_known_date() else {
                    return LineOutcome::Orphaned;
                };
                let Some(time) = time.to_time() else {
                    return LineOutcome::InvalidTimestamp(Dialect::Desktop);
                };
                let ts = date.and_time(time);
                // Same date, so only the time of day moves.
                state.establish(ts);
                LineOutcome::Record(Dialect::Desktop, NormalizedRecord::new(ts, sender, message))
            }
            FormatMatch::DateHeader { date } => match date.to_date() {
                Some(date) => {
                    state.establish(date.and_time(chrono::NaiveTime::MIN));
                    LineOutcome::DateChanged(date)
                }
                None => LineOutcome::InvalidTimestamp(Dialect::DateHeader),
            },
            FormatMatch::NoMatch => LineOutcome::Unmatched,
        }
    }

    fn dated_record(
        &self,
        state: &mut ParserState,
        dialect: Dialect,
        date: DateFields,
        time: ClockTime,
        sender: &str,
        message: &str,
    ) -> LineOutcome {
        let (Some(date), Some(time)) = (date.to_date(), time.to_time()) else {
            return LineOutcome::InvalidTimestamp(dialect);
        };
        let ts = date.and_time(time);
        state.establish(ts);
        LineOutcome::Record(dialect, NormalizedRecord::new(ts, sender, message))
    }

    /// Normalizes a sequence of lines into records, in input order.
    pub fn normalize<I, S>(&self, lines: I) -> Vec<NormalizedRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.normalize_with_report(lines).0
    }

    /// Normalizes a sequence of lines and reports what each line contributed.
    pub fn normalize_with_report<I, S>(&self, lines: I) -> (Vec<NormalizedRecord>, NormalizeReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = ParserState::new();
        let mut report = NormalizeReport::new();
        let mut records = Vec::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let outcome = self.step(&mut state, line.as_ref(), idx == 0);
            log_outcome(idx + 1, &outcome);
            report.observe(&outcome);
            if let LineOutcome::Record(_, record) = outcome {
                records.push(record);
            }
        }

        (records, report)
    }

    /// Normalizes export content held in memory.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`.
    pub fn normalize_str(&self, content: &str) -> Vec<NormalizedRecord> {
        self.normalize(split_lines(content))
    }

    /// Normalizes an export file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::Io`] if the file cannot be read, and
    /// [`KakaopackError::UnsupportedFormat`] if a non-empty file yields no
    /// records.
    pub fn normalize_file(&self, path: &Path) -> Result<Vec<NormalizedRecord>, KakaopackError> {
        self.normalize_file_with_report(path).map(|(records, _)| records)
    }

    /// Like [`normalize_file`](Self::normalize_file), also returning the report.
    pub fn normalize_file_with_report(
        &self,
        path: &Path,
    ) -> Result<(Vec<NormalizedRecord>, NormalizeReport), KakaopackError> {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = String::from_utf8_lossy(&bytes);

        let (records, report) = self.normalize_with_report(split_lines(&content));
        if report.is_unsupported() {
            return Err(KakaopackError::unsupported(Some(path.to_path_buf())));
        }

        tracing::info!(
            path = %path.display(),
            lines = report.total_lines,
            records = report.records,
            unmatched = report.unmatched,
            orphaned = report.orphaned,
            "Normalized export"
        );
        Ok((records, report))
    }

    /// Streams records from an export file without loading it into memory.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::Io`] if the file cannot be opened.
    #[cfg(feature = "streaming")]
    pub fn stream_file(
        &self,
        path: &Path,
    ) -> Result<RecordStream<BufReader<File>>, KakaopackError> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        Ok(RecordStream::new(self.clone(), reader).with_total_bytes(file_size))
    }
}

impl Default for LogNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogNormalizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Splits text into lines at `\n`, `\r\n` or a lone `\r`.
///
/// Like [`str::lines`], a final terminator does not start an extra empty line.
pub(crate) fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\r', '\n']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

pub(crate) fn log_outcome(line_no: usize, outcome: &LineOutcome) {
    match outcome {
        LineOutcome::Record(dialect, record) => {
            tracing::trace!(line = line_no, %dialect, date = %record.date_string(), "record");
        }
        LineOutcome::DateChanged(date) => {
            tracing::trace!(line = line_no, %date, "date header");
        }
        LineOutcome::Orphaned => {
            tracing::debug!(line = line_no, "Skipping desktop line before any date");
        }
        LineOutcome::InvalidTimestamp(dialect) => {
            tracing::debug!(line = line_no, %dialect, "Skipping line with out-of-range date or time");
        }
        LineOutcome::Unmatched | LineOutcome::Blank => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_mixed_scenario() {
        let records = LogNormalizer::new().normalize([
            "--------------- 2023년 8월 1일 화요일 ---------------",
            "[Alice] [오후 3:45] hi",
            "2023. 8. 2. 오전 9:05:30, Bob : hello",
        ]);
        assert_eq!(
            records,
            vec![
                NormalizedRecord::new(ts(2023, 8, 1, 15, 45, 0), "Alice", "hi"),
                NormalizedRecord::new(ts(2023, 8, 2, 9, 5, 30), "Bob", "hello"),
            ]
        );
    }

    #[test]
    fn test_desktop_without_date_is_skipped() {
        let normalizer = LogNormalizer::new();
        let (records, report) = normalizer.normalize_with_report(["[Alice] [오전 9:00] early"]);
        assert!(records.is_empty());
        assert_eq!(report.orphaned, 1);
        assert!(report.is_unsupported());
    }

    #[test]
    fn test_step_updates_state() {
        let normalizer = LogNormalizer::new();
        let mut state = ParserState::new();
        assert!(state.last_known().is_none());

        normalizer.step(&mut state, "2023년 8월 1일 오후 3:45, Alice : hello", true);
        assert_eq!(state.last_known(), Some(ts(2023, 8, 1, 15, 45, 0)));

        normalizer.step(&mut state, "--------------- 2023년 9월 2일 토요일 ---------------", false);
        assert_eq!(state.last_known(), Some(ts(2023, 9, 2, 0, 0, 0)));

        normalizer.step(&mut state, "[Bob] [오전 12:10] late", false);
        assert_eq!(state.last_known_date(), NaiveDate::from_ymd_opt(2023, 9, 2));
    }

    #[test]
    fn test_desktop_reuses_mobile_date() {
        let records = LogNormalizer::new().normalize([
            "2023. 8. 1. 오후 11:59:59, Alice : last",
            "[Bob] [오전 8:00] next",
        ]);
        assert_eq!(records[1].timestamp(), ts(2023, 8, 1, 8, 0, 0));
    }

    #[test]
    fn test_header_overrides_mobile_state() {
        let records = LogNormalizer::new().normalize([
            "2023. 8. 1. 오후 3:00, Alice : one",
            "--------------- 2023년 8월 5일 토요일 ---------------",
            "[Bob] [오후 12:30] two",
        ]);
        assert_eq!(records[1].timestamp(), ts(2023, 8, 5, 12, 30, 0));
    }

    #[test]
    fn test_invalid_timestamp_does_not_move_state() {
        let normalizer = LogNormalizer::new();
        let (records, report) = normalizer.normalize_with_report([
            "--------------- 2023년 8월 1일 화요일 ---------------",
            "2023. 2. 30. 오후 3:00, Alice : impossible",
            "[Bob] [오후 13:00] also impossible",
            "[Bob] [오후 1:00] fine",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp(), ts(2023, 8, 1, 13, 0, 0));
        assert_eq!(report.invalid_timestamps, 2);
    }

    #[test]
    fn test_bom_is_stripped_on_first_line() {
        let records =
            LogNormalizer::new().normalize(["\u{feff}2023. 8. 1. 오후 3:45, Alice : hello"]);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_bom_kept_when_disabled() {
        let normalizer =
            LogNormalizer::with_config(NormalizerConfig::new().with_strip_bom(false)).unwrap();
        let records = normalizer.normalize(["\u{feff}2023. 8. 1. 오후 3:45, Alice : hello"]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_split_lines_terminators() {
        let lines: Vec<_> = split_lines("a\nb\r\nc\rd\r\n\ne").collect();
        assert_eq!(lines, ["a", "b", "c", "d", "", "e"]);
        assert_eq!(split_lines("a\n").count(), 1);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_carriage_return_only_line_endings() {
        let records = LogNormalizer::new().normalize_str(
            "--------------- 2023년 8월 1일 화요일 ---------------\r[Alice] [오후 3:45] hi\r[Bob] [오후 3:46] hey\r",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sender, "Bob");
    }

    #[test]
    fn test_zero_buffer_size_rejected() {
        let err = LogNormalizer::with_config(NormalizerConfig::new().with_buffer_size(0))
            .unwrap_err();
        assert!(matches!(err, KakaopackError::InvalidFormat { format: "config", .. }));
    }

    #[test]
    fn test_report_counts() {
        let (_, report) = LogNormalizer::new().normalize_with_report([
            "Talk_2023.8.1 15:45-1.txt",
            "",
            "--------------- 2023년 8월 1일 화요일 ---------------",
            "[Alice] [오후 3:45] hi",
            "[Bob] [오후 3:46] hey",
            "continuation",
        ]);
        assert_eq!(report.total_lines, 6);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.date_headers, 1);
        assert_eq!(report.desktop, 2);
        assert_eq!(report.unmatched, 2);
        assert_eq!(report.records, 2);
        assert_eq!(report.export_kind(), Some(ExportKind::Windows));
        assert!(!report.is_unsupported());
    }

    #[test]
    fn test_export_kind_tie_prefers_precedence() {
        let report = NormalizeReport {
            mobile_a: 2,
            mobile_b: 2,
            ..NormalizeReport::default()
        };
        assert_eq!(report.export_kind(), Some(ExportKind::Ios));
        assert_eq!(NormalizeReport::default().export_kind(), None);
    }

    #[test]
    fn test_empty_input_is_not_unsupported() {
        let (records, report) = LogNormalizer::new().normalize_with_report(["", "   "]);
        assert!(records.is_empty());
        assert!(!report.is_unsupported());
    }

    #[test]
    fn test_normalize_str() {
        let content = "2023년 8월 1일 오전 12:05, Alice : midnight\n2023년 8월 1일 오후 12:05, Bob : noon\n";
        let records = LogNormalizer::new().normalize_str(content);
        assert_eq!(records[0].timestamp(), ts(2023, 8, 1, 0, 5, 0));
        assert_eq!(records[1].timestamp(), ts(2023, 8, 1, 12, 5, 0));
    }
}
