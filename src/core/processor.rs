//! Pipeline helpers around the aggregator.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::Message;
use crate::config::TranscriptConfig;
use crate::core::aggregate::SortedMessages;
use crate::core::filter::filter_system_messages;
use crate::error::Result;
use crate::parser::Parser;
use crate::parsers::WhatsAppParser;

/// Combines independently parsed transcripts into one sorted stream.
///
/// Messages with equal timestamps keep the order of the transcripts they came
/// from, then their order within the transcript.
pub fn merge_transcripts(transcripts: Vec<Vec<Message>>) -> SortedMessages {
    let merged: Vec<Message> = transcripts.into_iter().flatten().collect();
    SortedMessages::sort(merged)
}

/// Earliest and latest timestamp, or `None` for no messages.
pub fn date_span(messages: &[Message]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = messages.iter().map(|m| m.timestamp).min()?;
    let last = messages.iter().map(|m| m.timestamp).max()?;
    Some((first, last))
}

/// Parses a transcript file and drops system notices if configured to.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn read_transcript(path: &Path, config: &TranscriptConfig) -> Result<Vec<Message>> {
    read_transcript_with_count(path, config).map(|(messages, _)| messages)
}

/// Like [`read_transcript`], but also returns how many messages were parsed
/// before system notices were dropped.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub fn read_transcript_with_count(
    path: &Path,
    config: &TranscriptConfig,
) -> Result<(Vec<Message>, usize)> {
    let messages = WhatsAppParser::new().parse(path)?;
    let parsed = messages.len();
    let messages = if config.skip_system_messages {
        filter_system_messages(messages, &config.system_filter)
    } else {
        messages
    };
    tracing::debug!(path = %path.display(), parsed, kept = messages.len(), "read transcript");
    Ok((messages, parsed))
}

/// Message counts after each pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    pub parsed: usize,
    pub after_system_filter: usize,
    pub after_date_filter: usize,
    pub weeks: usize,
}

impl ProcessingStats {
    /// Messages removed as system notices.
    pub fn system_dropped(&self) -> usize {
        self.parsed.saturating_sub(self.after_system_filter)
    }

    /// Messages removed by the date range.
    pub fn date_dropped(&self) -> usize {
        self.after_system_filter.saturating_sub(self.after_date_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_merge_transcripts_sorts_globally() {
        let a = vec![
            Message::new(at(1, 9), "a", "1"),
            Message::new(at(3, 9), "a", "3"),
        ];
        let b = vec![
            Message::new(at(2, 9), "b", "2"),
            Message::new(at(3, 9), "b", "3b"),
        ];
        let merged = merge_transcripts(vec![a, b]);
        let texts: Vec<&str> = merged.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["1", "2", "3", "3b"]);
    }

    #[test]
    fn test_merge_nothing() {
        assert!(merge_transcripts(Vec::new()).is_empty());
        assert!(merge_transcripts(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn test_date_span() {
        let messages = vec![
            Message::new(at(5, 9), "a", "x"),
            Message::new(at(2, 9), "a", "x"),
            Message::new(at(9, 9), "a", "x"),
        ];
        assert_eq!(date_span(&messages), Some((at(2, 9), at(9, 9))));
        assert_eq!(date_span(&[]), None);
    }

    #[test]
    fn test_read_transcript_filters_notices() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[26.01.24, 05:00:00] a: \u{200E}Nachrichten und Anrufe sind Ende-zu-Ende-verschlüsselt.").unwrap();
        writeln!(file, "[26.01.24, 05:01:00] b: hello").unwrap();
        writeln!(file, "[26.01.24, 05:02:00] a: \u{200E}Bild weggelassen").unwrap();

        let kept = read_transcript(file.path(), &TranscriptConfig::default()).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].user, "b");

        let all = read_transcript(
            file.path(),
            &TranscriptConfig::default().with_skip_system_messages(false),
        )
        .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_read_transcript_with_count_reports_parsed_total() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[26.01.24, 05:00:00] a: \u{200E}Bild weggelassen").unwrap();
        writeln!(file, "[26.01.24, 05:01:00] b: hello").unwrap();
        writeln!(file, "[26.01.24, 05:02:00] b: again").unwrap();

        let (kept, parsed) =
            read_transcript_with_count(file.path(), &TranscriptConfig::default()).unwrap();
        assert_eq!(parsed, 3);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|m| m.user == "b"));

        let config = TranscriptConfig::default().with_skip_system_messages(false);
        let (all, parsed) = read_transcript_with_count(file.path(), &config).unwrap();
        assert_eq!((all.len(), parsed), (3, 3));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_transcript(Path::new("/no/such/chat.txt"), &TranscriptConfig::default())
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_stats_drops() {
        let stats = ProcessingStats {
            parsed: 10,
            after_system_filter: 7,
            after_date_filter: 4,
            weeks: 2,
        };
        assert_eq!(stats.system_dropped(), 3);
        assert_eq!(stats.date_dropped(), 3);
    }
}
