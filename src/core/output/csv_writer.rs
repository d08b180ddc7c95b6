//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::NormalizedRecord;
use crate::error::Result;
use crate::record::COLUMNS;

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `Date`, `User`, `Message`
/// - Header row is always written, even for an empty slice
/// - Fields containing commas, quotes or newlines are quoted
/// - Encoding: UTF-8
pub fn write_csv(records: &[NormalizedRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(records: &[NormalizedRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_records<W: Write>(records: &[NormalizedRecord], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b',').from_writer(sink);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer.flush()?;
    Ok(())
}
