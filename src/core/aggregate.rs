//! Weekly buckets and their summaries.
//!
//! [`WeeklyAggregator`] groups a chronologically sorted message stream by ISO
//! week, extracts conversation windows in each week and renders them as plain
//! text blocks, one [`WeeklySummary`] per non-empty week.
//!
//! The sorted precondition is carried by [`SortedMessages`]: the only ways to
//! build one are to sort or to verify.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use weekpack::Message;
//! use weekpack::config::WindowConfig;
//! use weekpack::core::aggregate::{SortedMessages, WeeklyAggregator};
//!
//! let at = |d: u32, h: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
//! let messages = SortedMessages::sort(vec![
//!     Message::new(at(29, 9), "target", "new week"),
//!     Message::new(at(26, 9), "friend", "hey"),
//!     Message::new(at(26, 10), "target", "hi"),
//! ]);
//!
//! let summaries = WeeklyAggregator::new(WindowConfig::new("target")).aggregate(&messages);
//! let keys: Vec<&str> = summaries.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["2024-W04", "2024-W05"]);
//! assert_eq!(summaries["2024-W04"].total_message_count, 2);
//! assert_eq!(
//!     summaries["2024-W04"].conversations[0],
//!     "[26.01.24, 09:00:00] friend: hey\n[26.01.24, 10:00:00] target: hi"
//! );
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::WindowConfig;
use crate::core::week::{WeekKey, week_range};
use crate::core::window::{ConversationWindow, extract_windows};
use crate::error::{Result, WeekpackError};

/// Messages with non-decreasing timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedMessages(Vec<Message>);

impl SortedMessages {
    /// Sorts `messages` by timestamp. The sort is stable, so messages with
    /// equal timestamps keep their input order.
    pub fn sort(mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| m.timestamp);
        Self(messages)
    }

    /// Accepts `messages` if they are already sorted.
    ///
    /// # Errors
    ///
    /// Returns [`WeekpackError::UnsortedInput`] naming the first message whose
    /// timestamp is earlier than its predecessor's.
    pub fn try_from_sorted(messages: Vec<Message>) -> Result<Self> {
        if let Some(pos) = messages
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(WeekpackError::unsorted(pos + 1));
        }
        Ok(Self(messages))
    }

    /// Borrows the messages in timestamp order.
    pub fn as_slice(&self) -> &[Message] {
        &self.0
    }

    /// Returns the underlying vector.
    pub fn into_inner(self) -> Vec<Message> {
        self.0
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the messages in timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

impl AsRef<[Message]> for SortedMessages {
    fn as_ref(&self) -> &[Message] {
        &self.0
    }
}

impl From<SortedMessages> for Vec<Message> {
    fn from(sorted: SortedMessages) -> Self {
        sorted.0
    }
}

/// All messages of one ISO week, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// `YYYY-Wnn`
    pub week_key: String,
    /// Monday 00:00:00 of the week.
    pub week_start: NaiveDateTime,
    /// Sunday 23:59:59 of the week.
    pub week_end: NaiveDateTime,
    pub messages: Vec<Message>,
}

impl WeekBucket {
    /// Builds a bucket, taking the week bounds from the first message.
    ///
    /// Returns `None` if `messages` is empty.
    pub fn new(messages: Vec<Message>) -> Option<Self> {
        let first = messages.first()?.timestamp;
        let (week_start, week_end) = week_range(first);
        Some(Self {
            week_key: WeekKey::from_timestamp(first).to_string(),
            week_start,
            week_end,
            messages,
        })
    }

    /// Number of messages sent by `user`.
    pub fn count_from(&self, user: &str) -> usize {
        self.messages.iter().filter(|m| m.is_from(user)).count()
    }

    /// Conversation windows around `target_user` within this week.
    pub fn windows(&self, target_user: &str, context_size: usize) -> Vec<ConversationWindow> {
        extract_windows(&self.messages, target_user, context_size)
    }
}

/// What one week hands to the analysis step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_key: String,
    pub week_start: NaiveDateTime,
    pub week_end: NaiveDateTime,
    /// One block per window, lines joined with `\n`
    pub conversations: Vec<String>,
    /// Messages sent by the target user this week
    pub target_message_count: usize,
    /// All messages this week
    pub total_message_count: usize,
}

/// Summaries keyed by week, in week order.
pub type WeeklySummaries = BTreeMap<String, WeeklySummary>;

/// Renders messages as `[DD.MM.YY, HH:MM:SS] user: text` lines joined by `\n`.
pub fn format_conversation(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::to_transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits a sorted stream into week buckets, ordered by week.
pub fn group_by_week(messages: &SortedMessages) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<WeekKey, Vec<Message>> = BTreeMap::new();
    for msg in messages.iter() {
        weeks
            .entry(WeekKey::from_timestamp(msg.timestamp))
            .or_default()
            .push(msg.clone());
    }

    weeks.into_values().filter_map(WeekBucket::new).collect()
}

/// Builds weekly summaries around one target user.
#[derive(Debug, Clone)]
pub struct WeeklyAggregator {
    config: WindowConfig,
}

impl WeeklyAggregator {
    /// Creates an aggregator for the given window settings.
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Returns the window settings.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Summarizes a single week.
    pub fn summarize(&self, bucket: &WeekBucket) -> WeeklySummary {
        let target = self.config.target_user.as_str();
        let conversations = bucket
            .windows(target, self.config.context_size)
            .iter()
            .map(|w| format_conversation(w.slice(&bucket.messages)))
            .collect();

        WeeklySummary {
            week_key: bucket.week_key.clone(),
            week_start: bucket.week_start,
            week_end: bucket.week_end,
            conversations,
            target_message_count: bucket.count_from(target),
            total_message_count: bucket.messages.len(),
        }
    }

    /// Summarizes every non-empty week of `messages`.
    ///
    /// An empty stream gives an empty map.
    pub fn aggregate(&self, messages: &SortedMessages) -> WeeklySummaries {
        let summaries: WeeklySummaries = group_by_week(messages)
            .iter()
            .map(|bucket| (bucket.week_key.clone(), self.summarize(bucket)))
            .collect();

        tracing::debug!(
            messages = messages.len(),
            weeks = summaries.len(),
            target = %self.config.target_user,
            "aggregated weeks"
        );
        summaries
    }
}
