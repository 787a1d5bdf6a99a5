//! Drop system notices and restrict messages to a date range.
//!
//! - [`filter_system_messages`] removes protocol notices (encryption banner,
//!   omitted media, deleted or edited markers) so they never count as
//!   authored messages.
//! - [`DateFilter`] with [`apply_date_filter`] keeps messages inside an
//!   inclusive date range.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use weekpack::Message;
//! use weekpack::config::SystemFilterConfig;
//! use weekpack::core::filter::filter_system_messages;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 26).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(ts, "Alice", "Hello"),
//!     Message::new(ts, "Bob", "\u{200E}Bild weggelassen"),
//!     Message::new(ts, "Bob", "Diese Nachricht wurde gelöscht."),
//! ];
//!
//! let kept = filter_system_messages(messages, &SystemFilterConfig::default());
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].user, "Alice");
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::Message;
use crate::config::SystemFilterConfig;
use crate::error::{Result, WeekpackError};

/// Returns `true` if `text` is a system notice under `config`.
pub fn is_system_notice(text: &str, config: &SystemFilterConfig) -> bool {
    text.starts_with(config.marker) || config.phrases.iter().any(|p| text.contains(p.as_str()))
}

/// Removes system notices, keeping the remaining messages in order.
pub fn filter_system_messages(messages: Vec<Message>, config: &SystemFilterConfig) -> Vec<Message> {
    let before = messages.len();
    let kept: Vec<Message> = messages
        .into_iter()
        .filter(|msg| !is_system_notice(&msg.text, config))
        .collect();

    tracing::debug!(
        kept = kept.len(),
        dropped = before - kept.len(),
        "filtered system notices"
    );
    kept
}

/// Inclusive date range filter.
///
/// # Examples
///
/// ```
/// use weekpack::core::filter::DateFilter;
///
/// # fn main() -> weekpack::Result<()> {
/// let filter = DateFilter::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
/// assert!(filter.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// Include only messages on or after this instant.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this instant.
    pub before: Option<NaiveDateTime>,
}

impl DateFilter {
    /// Creates a filter that lets everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive, from 00:00:00). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`WeekpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_hms_opt(0, 0, 0).unwrap());
        Ok(self)
    }

    /// Sets the end date (inclusive, through 23:59:59). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`WeekpackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        self.before = Some(date.and_hms_opt(23, 59, 59).unwrap());
        Ok(self)
    }

    /// Sets the start instant directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end instant directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `ts` lies within the bounds.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        !self.after.is_some_and(|after| ts < after) && !self.before.is_some_and(|before| ts > before)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| WeekpackError::invalid_date(date_str))
}

/// Keeps messages inside the filter's bounds, in order.
///
/// If no bound is set, returns the original messages unchanged.
pub fn apply_date_filter(messages: Vec<Message>, filter: &DateFilter) -> Vec<Message> {
    if !filter.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| filter.contains(msg.timestamp))
        .collect()
}
