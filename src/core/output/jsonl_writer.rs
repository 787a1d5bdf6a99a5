//! JSON Lines (JSONL) output writer.
//!
//! One summary per line, in week order. Suits pipelines that feed weeks to a
//! model one at a time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::aggregate::WeeklySummaries;
use crate::error::Result;

/// Writes summaries to a JSONL file.
///
/// # Format
/// ```text
/// {"week_key":"2024-W04","week_start":"2024-01-22T00:00:00",...}
/// {"week_key":"2024-W05","week_start":"2024-01-29T00:00:00",...}
/// ```
pub fn write_jsonl(summaries: &WeeklySummaries, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for summary in summaries.values() {
        serde_json::to_writer(&mut writer, summary)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts summaries to a JSONL string.
///
/// Each line is a complete JSON object; the output ends with a newline unless
/// there are no weeks.
pub fn to_jsonl(summaries: &WeeklySummaries) -> Result<String> {
    let mut output = String::new();
    for summary in summaries.values() {
        output.push_str(&serde_json::to_string(summary)?);
        output.push('\n');
    }
    Ok(output)
}
