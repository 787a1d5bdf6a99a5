//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analysis::CONVERSATION_SEPARATOR;
use crate::core::aggregate::{WeeklySummaries, WeeklySummary};
use crate::error::Result;

const HEADER: [&str; 6] = [
    "week_key",
    "week_start",
    "week_end",
    "target_message_count",
    "total_message_count",
    "conversations",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes summaries to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `week_key`, `week_start`, `week_end`, `target_message_count`,
///   `total_message_count`, `conversations`
/// - Conversation blocks are joined with the `---` separator used in prompts
/// - Encoding: UTF-8
pub fn write_csv(summaries: &WeeklySummaries, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(summaries, file)
}

/// Converts summaries to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(summaries: &WeeklySummaries) -> Result<String> {
    let mut buf = Vec::new();
    write_records(summaries, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(summaries: &WeeklySummaries, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(HEADER)?;
    for summary in summaries.values() {
        writer.write_record(build_record(summary))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(summary: &WeeklySummary) -> [String; 6] {
    [
        summary.week_key.clone(),
        summary.week_start.format(TIMESTAMP_FORMAT).to_string(),
        summary.week_end.format(TIMESTAMP_FORMAT).to_string(),
        summary.target_message_count.to_string(),
        summary.total_message_count.to_string(),
        summary.conversations.join(CONVERSATION_SEPARATOR),
    ]
}
