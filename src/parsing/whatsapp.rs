//! WhatsApp header line grammar.
//!
//! A header line opens a new message:
//!
//! ```text
//! [26.01.24, 05:47:03] chanti 🎀: message text
//! 25.02.24, 01:28:34 chanti 🎀: message text
//! ```
//!
//! The enclosing brackets are optional, the year has two digits (2000-based),
//! and the sender is everything up to the first colon. Lines that do not
//! match, or that match but carry an impossible date or time, are
//! continuations of the previous message.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::Message;

/// `[DD.MM.YY, HH:MM:SS] sender: body`, brackets optional, anchored at the
/// start of the line only.
const HEADER_PATTERN: &str = r"^\[?([0-9]{2})\.([0-9]{2})\.([0-9]{2}),\s*([0-9]{2}):([0-9]{2}):([0-9]{2})\]?\s*([^:]+):\s*(.+)";

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern is a valid regex"));

/// How a single transcript line is to be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The line starts a new message.
    Header(Message),
    /// The line belongs to whatever message is open.
    Continuation,
}

/// Classifies one line (without its trailing newline).
///
/// # Example
///
/// ```rust
/// use weekpack::parsing::whatsapp::{LineKind, classify_line};
///
/// let kind = classify_line("[26.01.24, 05:47:03] target: hi");
/// assert!(matches!(kind, LineKind::Header(ref m) if m.user == "target"));
///
/// assert_eq!(classify_line("just more text"), LineKind::Continuation);
/// ```
pub fn classify_line(line: &str) -> LineKind {
    match parse_header(line) {
        Some(msg) => LineKind::Header(msg),
        None => LineKind::Continuation,
    }
}

/// Parses a header line into a fresh message, or `None` if the line is not a
/// valid header.
pub fn parse_header(line: &str) -> Option<Message> {
    let caps = HEADER_REGEX.captures(line)?;

    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let number = |i: usize| field(i).parse::<u32>().ok();

    let timestamp = build_timestamp(
        number(1)?,
        number(2)?,
        number(3)?,
        number(4)?,
        number(5)?,
        number(6)?,
    )?;

    Some(Message::with_raw_source(
        timestamp,
        field(7).trim(),
        field(8).trim(),
        line,
    ))
}

/// Assembles a calendar date-time from the header's two-digit fields.
///
/// Returns `None` for dates or times that do not exist (day 32, 30 February,
/// hour 24, second 60).
pub fn build_timestamp(
    day: u32,
    month: u32,
    year: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    let year = 2000 + i32::try_from(year).ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}
