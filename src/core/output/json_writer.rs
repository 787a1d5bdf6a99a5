//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::aggregate::WeeklySummaries;
use crate::error::Result;

/// Writes summaries to a JSON file as an object keyed by week.
///
/// # Format
/// ```json
/// {
///   "2024-W04": {
///     "week_key": "2024-W04",
///     "week_start": "2024-01-22T00:00:00",
///     "week_end": "2024-01-28T23:59:59",
///     "conversations": ["[26.01.24, 05:47:03] target: hi"],
///     "target_message_count": 1,
///     "total_message_count": 1
///   }
/// }
/// ```
pub fn write_json(summaries: &WeeklySummaries, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(summaries)?;
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Converts summaries to a pretty-printed JSON object keyed by week.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(summaries: &WeeklySummaries) -> Result<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}
