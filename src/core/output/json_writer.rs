//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::NormalizedRecord;
use crate::error::Result;

/// Writes records to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"Date": "2023-08-01 15:45:00", "User": "Alice", "Message": "Hello"},
///   {"Date": "2023-08-01 15:46:00", "User": "Bob", "Message": "Hi"}
/// ]
/// ```
pub fn write_json(records: &[NormalizedRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a pretty-printed JSON array.
pub fn to_json(records: &[NormalizedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
