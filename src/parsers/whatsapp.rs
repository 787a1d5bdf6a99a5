//! `WhatsApp` TXT export parser.
//!
//! Handles the dotted two-digit-year format, with or without brackets:
//! - `[26.01.24, 05:47:03] Sender: Message`
//! - `26.01.24, 05:47:03 Sender: Message`
//!
//! Multi-line bodies are rebuilt by appending every non-header line to the
//! message that is currently open. Lines before the first header are dropped.

use crate::Message;
use crate::parser::Parser;
use crate::parsing::whatsapp::{LineKind, classify_line};

/// Scanner state between two lines.
///
/// A message stays [`Open`](ParseState::Open) while continuation lines
/// arrive and is sealed, never to change again, when the next header or the
/// end of input is reached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    /// No header seen yet.
    #[default]
    Idle,
    /// A message is collecting continuation lines.
    Open(Message),
}

impl ParseState {
    /// Feeds one line and returns the next state, plus the message this line
    /// sealed, if any.
    pub fn step(self, line: &str) -> (ParseState, Option<Message>) {
        match (self, classify_line(line)) {
            (ParseState::Idle, LineKind::Header(msg)) => (ParseState::Open(msg), None),
            (ParseState::Open(sealed), LineKind::Header(msg)) => {
                (ParseState::Open(msg), Some(sealed))
            }
            (ParseState::Open(mut msg), LineKind::Continuation) => {
                msg.push_continuation(line);
                (ParseState::Open(msg), None)
            }
            (ParseState::Idle, LineKind::Continuation) => {
                tracing::trace!(line, "dropping line before first header");
                (ParseState::Idle, None)
            }
        }
    }

    /// Ends the input, sealing the open message if there is one.
    pub fn finish(self) -> Option<Message> {
        match self {
            ParseState::Idle => None,
            ParseState::Open(msg) => Some(msg),
        }
    }
}

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use weekpack::parsers::WhatsAppParser;
///
/// let parser = WhatsAppParser::new();
/// let messages = parser.parse_lines([
///     "[26.01.24, 05:47:03] Alice: first line",
///     "second line",
///     "26.01.24, 05:48:00 Bob: reply",
/// ]);
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].text, "first line\nsecond line");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatsAppParser;

impl WhatsAppParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses lines (without trailing newlines) into messages, in input order.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<Message>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut messages = Vec::new();
        let mut state = ParseState::Idle;

        for (i, line) in lines.into_iter().enumerate() {
            let line = if i == 0 {
                line.strip_prefix('\u{FEFF}').unwrap_or(line)
            } else {
                line
            };

            let (next, sealed) = state.step(line);
            messages.extend(sealed);
            state = next;
        }

        messages.extend(state.finish());
        messages
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, content: &str) -> Vec<Message> {
        self.parse_lines(content.lines())
    }
}
