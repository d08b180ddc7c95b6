//! # kakaopack CLI
//!
//! Command-line interface for the kakaopack library.

use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::Parser as ClapParser;

use kakaopack::cli::Args;
use kakaopack::config::{LocaleConfig, NormalizerConfig};
use kakaopack::core::{DateRange, IdentityMasker, filter_records, prepare_conversation, read_csv};
use kakaopack::format::write_to_format;
use kakaopack::logging;
use kakaopack::normalizer::{LogNormalizer, NormalizeReport};
use kakaopack::{KakaopackError, NormalizedRecord};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), KakaopackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    logging::init(args.debug);

    let output_path = args.output_path();
    let lib_format = args.output_format();

    println!("📦 kakaopack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", lib_format);
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }

    let range = match (&args.start, &args.end) {
        (Some(start), Some(end)) => {
            let range = DateRange::parse(start, end)?;
            println!("📅 Range:   {} ~ {}", range.start(), range.end());
            Some(range)
        }
        _ => None,
    };

    if let Some(ref locale) = args.locale {
        println!("🌐 Locale:  {}", locale);
    }

    println!();

    let normalizer = build_normalizer(&args)?;
    let input = Path::new(&args.input);

    let (records, report, parse_time) = if is_normalized_csv(input) {
        println!("⏳ Reading normalized CSV...");
        let start = Instant::now();
        (read_csv(input)?, None, start.elapsed())
    } else if args.streaming {
        let (records, report, elapsed) = normalize_streaming(&normalizer, input)?;
        (records, Some(report), elapsed)
    } else {
        println!("⏳ Normalizing export...");
        let start = Instant::now();
        let (records, report) = normalizer.normalize_file_with_report(input)?;
        (records, Some(report), start.elapsed())
    };
    let original_count = records.len();

    println!(
        "   Found {} records ({:.2}s)",
        original_count,
        parse_time.as_secs_f64()
    );
    if let Some(kind) = report.as_ref().and_then(NormalizeReport::export_kind) {
        println!("   Detected {} export", kind);
    }

    let selected: Vec<NormalizedRecord> = match range {
        Some(ref range) => {
            println!("🔍 Filtering by date...");
            let selected: Vec<_> = filter_records(&records, range).cloned().collect();
            println!("   {} records in range", selected.len());
            selected
        }
        None => records.clone(),
    };

    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&selected, &output_path, lib_format)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    if let Some(segments) = args.excerpt {
        let excerpt_range = match range {
            Some(range) => range,
            None => DateRange::new(NaiveDate::MIN, NaiveDate::MAX)?,
        };
        let prepared = prepare_conversation(
            records,
            &IdentityMasker,
            &excerpt_range,
            &args.separator,
            segments,
        );
        println!();
        println!("📝 Latest conversation ({} segments max):", segments);
        for line in prepared.latest_excerpt.lines() {
            println!("   {}", line);
        }
    }

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    println!();
    println!("📊 Summary:");
    println!("   Records:   {}", original_count);
    if let Some(ref report) = report {
        println!("   Lines:     {}", report.total_lines);
        println!("   Headers:   {}", report.date_headers);
        println!("   Skipped:   {}", skipped(report));
    }
    if range.is_some() {
        println!("   In range:  {}", selected.len());
    }

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let per_sec = original_count as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} records/sec", per_sec);

    Ok(())
}

fn build_normalizer(args: &Args) -> Result<LogNormalizer, KakaopackError> {
    let Some(ref locale_path) = args.locale else {
        return Ok(LogNormalizer::new());
    };
    let locale = LocaleConfig::from_toml_file(Path::new(locale_path))?;
    LogNormalizer::with_config(NormalizerConfig::new().with_locale(locale))
}

/// Normalize using the line-by-line reader (memory-efficient)
fn normalize_streaming(
    normalizer: &LogNormalizer,
    input: &Path,
) -> Result<(Vec<NormalizedRecord>, NormalizeReport, Duration), KakaopackError> {
    println!("⏳ Streaming export...");
    let start = Instant::now();

    let mut stream = normalizer.stream_file(input)?;
    let mut records = Vec::new();
    for result in stream.by_ref() {
        records.push(result?);
    }

    let report = *stream.report();
    if report.is_unsupported() {
        return Err(KakaopackError::unsupported(Some(input.to_path_buf())));
    }
    Ok((records, report, start.elapsed()))
}

fn is_normalized_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn skipped(report: &NormalizeReport) -> usize {
    report.unmatched + report.orphaned + report.invalid_timestamps
}
