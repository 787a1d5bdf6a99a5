//! Core processing logic for weekpack.
//!
//! This module contains:
//! - [`filter`] - System notice removal and date ranges
//! - [`week`] - ISO week keys and bounds
//! - [`window`] - Conversation windows around the target user
//! - [`aggregate`] - Weekly buckets and summaries
//! - [`processor`] - Transcript merging and statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use weekpack::config::{SystemFilterConfig, WindowConfig};
//! use weekpack::core::{WeeklyAggregator, filter_system_messages, merge_transcripts};
//! use weekpack::parsers::WhatsAppParser;
//!
//! let parsed = WhatsAppParser::new().parse_lines([
//!     "[26.01.24, 05:47:03] friend: morning",
//!     "[26.01.24, 05:48:10] target: hi!",
//! ]);
//! let cleaned = filter_system_messages(parsed, &SystemFilterConfig::default());
//! let sorted = merge_transcripts(vec![cleaned]);
//!
//! let weeks = WeeklyAggregator::new(WindowConfig::new("target")).aggregate(&sorted);
//! assert_eq!(weeks["2024-W04"].target_message_count, 1);
//! ```

pub mod aggregate;
pub mod filter;
pub mod output;
pub mod processor;
pub mod week;
pub mod window;

// Re-export main types for convenience
pub use aggregate::{
    SortedMessages, WeekBucket, WeeklyAggregator, WeeklySummaries, WeeklySummary,
    format_conversation, group_by_week,
};
pub use filter::{DateFilter, apply_date_filter, filter_system_messages, is_system_notice};
pub use processor::{ProcessingStats, date_span, merge_transcripts, read_transcript};
pub use week::{WeekKey, week_key, week_range};
pub use window::{ConversationWindow, extract_windows};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
