//! Line-by-line record iterator.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::NormalizedRecord;
use crate::error::KakaopackError;
use crate::normalizer::{
    LineOutcome, LogNormalizer, NormalizeReport, ParserState, log_outcome, split_lines,
};

/// Iterator over the records of an export read from any [`BufRead`].
///
/// Invalid UTF-8 is replaced rather than rejected, matching
/// [`LogNormalizer::normalize_file`]. Input is read up to each `\n`, and a
/// lone `\r` inside that chunk also ends a line. An I/O error is yielded once
/// and ends the stream.
pub struct RecordStream<R: BufRead> {
    normalizer: LogNormalizer,
    reader: R,
    state: ParserState,
    report: NormalizeReport,
    line_buffer: Vec<u8>,
    pending: VecDeque<String>,
    lines_read: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Creates a stream over `reader` with a fresh [`ParserState`].
    pub fn new(normalizer: LogNormalizer, reader: R) -> Self {
        Self {
            normalizer,
            reader,
            state: ParserState::new(),
            report: NormalizeReport::new(),
            line_buffer: Vec::with_capacity(4096),
            pending: VecDeque::new(),
            lines_read: 0,
            bytes_read: 0,
            total_bytes: None,
            finished: false,
        }
    }

    /// Sets the total input size, enabling [`progress`](Self::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if the total size is unknown or zero.
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some((self.bytes_read as f64 / total as f64) * 100.0),
            _ => None,
        }
    }

    /// Returns the number of bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the total input size, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Returns the counts accumulated so far.
    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }

    /// Returns the carried state after the lines read so far.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }
        self.line_buffer.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.line_buffer)?;
        if bytes == 0 {
            return Ok(None);
        }
        self.bytes_read += bytes as u64;
        let chunk = String::from_utf8_lossy(&self.line_buffer);
        self.pending.extend(split_lines(&chunk).map(str::to_owned));
        Ok(self.pending.pop_front())
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<NormalizedRecord, KakaopackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(Some(line)) => {
                    let first = self.lines_read == 0;
                    self.lines_read += 1;
                    let outcome = self.normalizer.step(&mut self.state, &line, first);
                    log_outcome(self.lines_read, &outcome);
                    self.report.observe(&outcome);
                    if let LineOutcome::Record(_, record) = outcome {
                        return Some(Ok(record));
                    }
                }
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn windows_export() -> &'static str {
        "Talk with Alice\n\
         저장한 날짜 : 2023-08-03 10:00:00\n\
         \n\
         --------------- 2023년 8월 1일 화요일 ---------------\n\
         [Alice] [오후 3:45] hi\n\
         [Bob] [오후 3:46] hey, how are you\n\
         --------------- 2023년 8월 2일 수요일 ---------------\n\
         [Alice] [오전 12:01] late night\n"
    }

    #[test]
    fn test_stream_matches_in_memory() {
        let normalizer = LogNormalizer::new();
        let expected = normalizer.normalize_str(windows_export());

        let stream = RecordStream::new(normalizer, Cursor::new(windows_export()));
        let streamed: Vec<_> = stream.map(Result::unwrap).collect();

        assert_eq!(streamed, expected);
        assert_eq!(streamed.len(), 3);
        assert_eq!(streamed[2].date_string(), "2023-08-02 00:01:00");
    }

    #[test]
    fn test_stream_report_and_progress() {
        let content = windows_export();
        let mut stream = RecordStream::new(LogNormalizer::new(), Cursor::new(content))
            .with_total_bytes(content.len() as u64);
        assert_eq!(stream.progress(), Some(0.0));

        while stream.next().is_some() {}

        assert_eq!(stream.bytes_processed(), content.len() as u64);
        assert_eq!(stream.progress(), Some(100.0));
        assert_eq!(stream.report().records, 3);
        assert_eq!(stream.report().date_headers, 2);
        assert_eq!(
            stream.state().last_known_date(),
            chrono::NaiveDate::from_ymd_opt(2023, 8, 2)
        );
    }

    #[test]
    fn test_stream_crlf_and_invalid_utf8() {
        let mut bytes = b"2023. 8. 1. \xEC\x98\xA4\xED\x9B\x84 3:45, Alice : hi\r\n".to_vec();
        bytes.extend_from_slice(b"\xff\xfe garbage\r\n");
        let stream = RecordStream::new(LogNormalizer::new(), Cursor::new(bytes));
        let records: Vec<_> = stream.map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "hi");
    }

    #[test]
    fn test_stream_carriage_return_line_endings() {
        let content = windows_export().replace('\n', "\r");
        let normalizer = LogNormalizer::new();
        let expected = normalizer.normalize_str(windows_export());

        let mut stream = RecordStream::new(normalizer, Cursor::new(content));
        let streamed: Vec<_> = stream.by_ref().map(Result::unwrap).collect();

        assert_eq!(streamed, expected);
        assert_eq!(stream.report().total_lines, 8);
    }

    #[test]
    fn test_stream_io_error_ends_stream() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let mut stream = RecordStream::new(LogNormalizer::new(), BufReader::new(FailingReader));
        assert!(matches!(stream.next(), Some(Err(KakaopackError::Io(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_stream_empty_input() {
        let mut stream = RecordStream::new(LogNormalizer::new(), Cursor::new(""));
        assert!(stream.next().is_none());
        assert_eq!(stream.progress(), None);
    }
}
