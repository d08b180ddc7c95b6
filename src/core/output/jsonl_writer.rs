//! JSON Lines (JSONL) output writer.
//!
//! One record per line, so downstream tools can process an export without
//! loading the whole array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::NormalizedRecord;
use crate::error::Result;

/// Writes records to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"Date":"2023-08-01 15:45:00","User":"Alice","Message":"Hello"}
/// {"Date":"2023-08-01 15:46:00","User":"Bob","Message":"Hi"}
/// ```
pub fn write_jsonl(records: &[NormalizedRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[NormalizedRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_lines<W: Write>(records: &[NormalizedRecord], writer: &mut W) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
