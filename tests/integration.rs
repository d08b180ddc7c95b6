//! Integration tests for normalizing whole export files.

use kakaopack::core::{IdentityMasker, prepare_conversation, read_csv, write_csv};
use kakaopack::normalizer::ExportKind;
use kakaopack::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const IOS_EXPORT: &str = "\
Alice 님과 카카오톡 대화
저장한 날짜 : 2023. 8. 3. 오전 10:00

2023. 8. 1. 오후 3:45:12, Alice : hello
2023. 8. 1. 오후 3:46, Bob : hi, long time no see
second line of Bob's message
2023. 8. 2. 오전 12:05, Alice : are you up?
2023. 8. 2. 오후 12:30:00, Bob : lunch
";

const ANDROID_EXPORT: &str = "\
Alice 님과 카카오톡 대화
저장한 날짜 : 2023년 8월 3일 오전 10:00

2023년 8월 1일 오후 3:45, Alice : hello
2023년 8월 1일 오후 3:46, Bob : hi
2023년 8월 2일 오전 9:00, Alice : morning
";

const WINDOWS_EXPORT: &str = "\
Alice 님과 카카오톡 대화
저장한 날짜 : 2023-08-03 10:00:00

--------------- 2023년 8월 1일 화요일 ---------------
[Alice] [오후 3:45] hi
[Bob] [오후 3:46] hey
--------------- 2023년 8월 2일 수요일 ---------------
[Alice] [오전 12:01] late
[Bob] [오후 12:00] noon
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Dialects
// ============================================================================

#[test]
fn test_ios_export_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "ios.txt", IOS_EXPORT);

    let (records, report) = LogNormalizer::new()
        .normalize_file_with_report(&path)
        .unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].date_string(), "2023-08-01 15:45:12");
    assert_eq!(records[1].date_string(), "2023-08-01 15:46:00");
    assert_eq!(records[1].message, "hi, long time no see");
    assert_eq!(records[2].date_string(), "2023-08-02 00:05:00");
    assert_eq!(records[3].date_string(), "2023-08-02 12:30:00");

    assert_eq!(report.mobile_a, 4);
    assert_eq!(report.blank_lines, 1);
    assert_eq!(report.export_kind(), Some(ExportKind::Ios));
}

#[test]
fn test_android_export_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "android.txt", ANDROID_EXPORT);

    let (records, report) = LogNormalizer::new()
        .normalize_file_with_report(&path)
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date_string(), "2023-08-01 15:45:00");
    assert_eq!(records[2].sender, "Alice");
    assert_eq!(records[2].date_string(), "2023-08-02 09:00:00");
    assert_eq!(report.export_kind(), Some(ExportKind::Android));
}

#[test]
fn test_windows_export_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "windows.txt", WINDOWS_EXPORT);

    let (records, report) = LogNormalizer::new()
        .normalize_file_with_report(&path)
        .unwrap();

    let rows: Vec<_> = records.iter().map(|r| r.to_row()).collect();
    assert_eq!(
        rows,
        vec![
            ["2023-08-01 15:45:00".to_string(), "Alice".into(), "hi".into()],
            ["2023-08-01 15:46:00".to_string(), "Bob".into(), "hey".into()],
            ["2023-08-02 00:01:00".to_string(), "Alice".into(), "late".into()],
            ["2023-08-02 12:00:00".to_string(), "Bob".into(), "noon".into()],
        ]
    );
    assert_eq!(report.date_headers, 2);
    assert_eq!(report.export_kind(), Some(ExportKind::Windows));
}

#[test]
fn test_mixed_header_desktop_mobile() {
    let records = LogNormalizer::new().normalize([
        "--------------- 2023년 8월 1일 화요일 ---------------",
        "[Alice] [오후 3:45] hi",
        "2023. 8. 2. 오전 9:05:30, Bob : hello",
    ]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].to_row(), [
        "2023-08-01 15:45:00".to_string(),
        "Alice".to_string(),
        "hi".to_string()
    ]);
    assert_eq!(records[1].to_row(), [
        "2023-08-02 09:05:30".to_string(),
        "Bob".to_string(),
        "hello".to_string()
    ]);
}

#[test]
fn test_mobile_line_dates_following_desktop_lines() {
    let records = LogNormalizer::new().normalize([
        "2023년 8월 5일 오후 11:00, Alice : night",
        "[Bob] [오후 11:30] still here",
    ]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].date_string(), "2023-08-05 23:30:00");
}

// ============================================================================
// File errors
// ============================================================================

#[test]
fn test_unsupported_file() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "notes.txt", "shopping list\nmilk\neggs\n");

    let err = LogNormalizer::new().normalize_file(&path).unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("notes.txt"));
}

#[test]
fn test_empty_file_is_not_an_error() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "empty.txt", "\n\n");

    let records = LogNormalizer::new().normalize_file(&path).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_missing_file() {
    let err = LogNormalizer::new()
        .normalize_file("/no/such/export.txt".as_ref())
        .unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_stream_and_file_agree_for_small_buffers() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "one.txt", "2023. 8. 1. 오후 3:45, Alice : hello\n");

    let zero = LogNormalizer::with_config(NormalizerConfig::new().with_buffer_size(0));
    assert!(zero.is_err());

    let normalizer = LogNormalizer::with_config(NormalizerConfig::new().with_buffer_size(1)).unwrap();
    let from_file = normalizer.normalize_file(&path).unwrap();
    let streamed: Vec<_> = normalizer
        .stream_file(&path)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(from_file.len(), 1);
    assert_eq!(streamed, from_file);
}

#[test]
fn test_non_utf8_bytes_are_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    let mut bytes = "2023. 8. 1. 오후 3:45, Alice : caf".as_bytes().to_vec();
    bytes.push(0xE9);
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();

    let records = LogNormalizer::new().normalize_file(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "caf\u{FFFD}");
}

// ============================================================================
// Locale
// ============================================================================

#[test]
fn test_locale_from_toml_file() {
    let dir = tempdir().unwrap();
    let locale_path = write_fixture(
        &dir,
        "locale.toml",
        "morning = \"AM\"\nafternoon = \"PM\"\n",
    );
    let locale = LocaleConfig::from_toml_file(&locale_path).unwrap();
    assert_eq!(locale.year_suffix, "년");

    let normalizer =
        LogNormalizer::with_config(NormalizerConfig::new().with_locale(locale)).unwrap();
    let records = normalizer.normalize([
        "2023. 8. 1. PM 3:45, Alice : hello",
        "2023. 8. 1. 오후 3:45, Alice : korean markers no longer match",
        "[Bob] [AM 12:10] hi",
    ]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date_string(), "2023-08-01 15:45:00");
    assert_eq!(records[1].date_string(), "2023-08-01 00:10:00");
}

#[test]
fn test_invalid_locale_rejected() {
    let locale = LocaleConfig::default().with_markers("AM", "AM");
    let err = LogNormalizer::with_config(NormalizerConfig::new().with_locale(locale)).unwrap_err();
    assert!(err.is_invalid_locale());
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_pipeline_range_text_and_excerpt() {
    let records = LogNormalizer::new().normalize_str(IOS_EXPORT);
    let range = DateRange::parse("2023-08-02", "2023-08-02").unwrap();

    let prepared = prepare_conversation(records, &IdentityMasker, &range, " ", 1);

    assert_eq!(prepared.records.len(), 4);
    assert_eq!(prepared.conversation_text, "are you up? lunch");
    assert_eq!(prepared.latest_excerpt, "lunch");
}

#[test]
fn test_csv_roundtrip_through_files() {
    let dir = tempdir().unwrap();
    let records = LogNormalizer::new().normalize_str(IOS_EXPORT);
    let csv_path = dir.path().join("normalized.csv");

    write_csv(&records, &csv_path).unwrap();
    let back = read_csv(&csv_path).unwrap();

    assert_eq!(back, records);
}
