//! # Weekpack
//!
//! A Rust library for turning WhatsApp chat exports into weekly conversation
//! summaries centered on one participant.
//!
//! ## Overview
//!
//! Weekpack reads the plain-text transcript that WhatsApp exports
//! (`[DD.MM.YY, HH:MM:SS] sender: text`), rebuilds multi-line messages, drops
//! protocol notices, groups everything by ISO calendar week and, in each week,
//! cuts out the conversations around one target participant. The result is a
//! per-week record with counts and formatted conversation blocks, ready to be
//! handed to a language model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use weekpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let messages = read_transcript(Path::new("_chat.txt"), &TranscriptConfig::default())?;
//!     let sorted = merge_transcripts(vec![messages]);
//!
//!     let weeks = WeeklyAggregator::new(WindowConfig::new("mai ly")).aggregate(&sorted);
//!     for (key, week) in &weeks {
//!         println!("{key}: {} conversations", week.conversations.len());
//!     }
//!
//!     write_json(&weeks, "weeks.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait: text or file to messages
//! - [`parsers`] - [`WhatsAppParser`](parsers::WhatsAppParser) and its line state machine
//! - [`parsing`] - Header line grammar shared by parsers
//! - [`core`] - Filtering, ISO weeks, windows, aggregation, output
//! - [`analysis`] - Prompts and reply parsing for the language-model step
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`config`] - Configuration types and the settings file
//! - [`error`] - Unified error types ([`WeekpackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{Result, WeekpackError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use weekpack::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{Result, WeekpackError};

    // Parsing
    pub use crate::parser::Parser;
    pub use crate::parsers::WhatsAppParser;

    // Configuration
    pub use crate::config::{
        Settings, SystemFilterConfig, SystemNoticeLocale, TranscriptConfig, WindowConfig,
    };

    // Filtering
    pub use crate::core::filter::{DateFilter, apply_date_filter, filter_system_messages};

    // Weeks, windows, aggregation
    pub use crate::core::aggregate::{
        SortedMessages, WeeklyAggregator, WeeklySummaries, WeeklySummary,
    };
    pub use crate::core::week::{WeekKey, week_key, week_range};
    pub use crate::core::window::{ConversationWindow, extract_windows};

    // Processing
    pub use crate::core::processor::{
        ProcessingStats, date_span, merge_transcripts, read_transcript,
    };

    // Analysis hand-off
    pub use crate::analysis::{WeekAnalyzer, analyze_weeks};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
