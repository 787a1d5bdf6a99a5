//! Parser trait for chat transcripts.
//!
//! Parsing itself never fails: lines that cannot be read as a header are
//! folded into the previous message or dropped. Only reading the file can
//! fail.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use weekpack::parser::Parser;
//! use weekpack::parsers::WhatsAppParser;
//!
//! let parser = WhatsAppParser::new();
//! let messages = parser.parse(Path::new("_chat.txt"))?;
//! println!("{} messages", messages.len());
//! # Ok::<(), weekpack::WeekpackError>(())
//! ```

use std::fs;
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Turns transcript text into an ordered list of messages.
///
/// Implementors provide [`parse_str`](Parser::parse_str); reading from a file
/// is provided on top of it.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses transcript content held in memory.
    fn parse_str(&self, content: &str) -> Vec<Message>;

    /// Reads a UTF-8 transcript file and parses it.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        let messages = self.parse_str(&content);
        tracing::debug!(
            path = %path.display(),
            parser = self.name(),
            count = messages.len(),
            "parsed transcript"
        );
        Ok(messages)
    }
}
