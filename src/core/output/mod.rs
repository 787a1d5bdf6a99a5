//! Output format writers for weekly summaries.
//!
//! - [`write_csv`] / [`to_csv`] - one row per week, semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON object keyed by week - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON summary per line - requires `json-output` feature
//!
//! The `to_*` functions return strings; the `write_*` functions write the
//! same content to a file.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> weekpack::Result<()> {
//! use weekpack::config::WindowConfig;
//! use weekpack::core::aggregate::{SortedMessages, WeeklyAggregator};
//! use weekpack::core::output::{to_csv, write_json};
//!
//! let summaries = WeeklyAggregator::new(WindowConfig::new("target"))
//!     .aggregate(&SortedMessages::default());
//!
//! write_json(&summaries, "weeks.json")?;
//! let csv_string = to_csv(&summaries)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
