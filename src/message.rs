//! The message record reconstructed from a transcript.
//!
//! A [`Message`] is one authored utterance: who sent it, when, what it said,
//! and the exact transcript line(s) it was rebuilt from.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use weekpack::Message;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 26)
//!     .unwrap()
//!     .and_hms_opt(5, 47, 3)
//!     .unwrap();
//! let msg = Message::new(ts, "alice", "hi");
//!
//! assert_eq!(msg.user(), "alice");
//! assert_eq!(msg.to_transcript_line(), "[26.01.24, 05:47:03] alice: hi");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used when a message is rendered back into a conversation
/// block.
pub const TRANSCRIPT_TIMESTAMP_FORMAT: &str = "%d.%m.%y, %H:%M:%S";

/// A single chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Send time exactly as written in the export |
/// | `user` | `String` | Sender display name, trimmed |
/// | `text` | `String` | Body, continuation lines joined with `\n` |
/// | `raw_source` | `String` | Original line(s), joined with `\n` |
///
/// Timestamps carry no time zone. Exports are written in the exporting
/// device's local time and are kept that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, second resolution.
    pub timestamp: NaiveDateTime,

    /// Display name of the sender.
    pub user: String,

    /// Text content of the message.
    ///
    /// May contain newlines for multiline messages.
    pub text: String,

    /// The transcript line(s) this record was built from, verbatim.
    pub raw_source: String,
}

impl Message {
    /// Creates a message whose raw source is its canonical transcript line.
    pub fn new(timestamp: NaiveDateTime, user: impl Into<String>, text: impl Into<String>) -> Self {
        let mut msg = Self {
            timestamp,
            user: user.into(),
            text: text.into(),
            raw_source: String::new(),
        };
        msg.raw_source = msg.to_transcript_line();
        msg
    }

    /// Creates a message with every field given explicitly.
    pub fn with_raw_source(
        timestamp: NaiveDateTime,
        user: impl Into<String>,
        text: impl Into<String>,
        raw_source: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            user: user.into(),
            text: text.into(),
            raw_source: raw_source.into(),
        }
    }

    /// Appends a continuation line to both the body and the raw source.
    pub(crate) fn push_continuation(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
        self.raw_source.push('\n');
        self.raw_source.push_str(line);
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the send time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the original transcript line(s).
    pub fn raw_source(&self) -> &str {
        &self.raw_source
    }

    /// Returns `true` if this message was sent by `user`.
    ///
    /// The comparison is exact: display names in exports are stable and may
    /// legitimately differ only by case or emoji.
    pub fn is_from(&self, user: &str) -> bool {
        self.user == user
    }

    /// Renders the message as `[DD.MM.YY, HH:MM:SS] user: text`.
    pub fn to_transcript_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format(TRANSCRIPT_TIMESTAMP_FORMAT),
            self.user,
            self.text
        )
    }
}
