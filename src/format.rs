//! Output format selection for weekly summaries.
//!
//! [`OutputFormat`] does not depend on any CLI framework; with the `cli`
//! feature it also implements `clap::ValueEnum`.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> weekpack::Result<()> {
//! use weekpack::core::aggregate::WeeklySummaries;
//! use weekpack::format::{OutputFormat, to_format_string};
//!
//! let format = OutputFormat::from_path("weeks.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let text = to_format_string(&WeeklySummaries::new(), OutputFormat::Json)?;
//! assert_eq!(text, "{}");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::aggregate::WeeklySummaries;
use crate::error::{Result, WeekpackError};

/// Output format for weekly summaries.
///
/// - [`Json`](OutputFormat::Json) - one object keyed by week, for consumers
///   that load everything at once
/// - [`Jsonl`](OutputFormat::Jsonl) - one summary per line, for feeding weeks
///   to a model one by one
/// - [`Csv`](OutputFormat::Csv) - one row per week, for spreadsheets
///
/// # Example
///
/// ```rust
/// use weekpack::format::OutputFormat;
///
/// let format: OutputFormat = "ndjson".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON object keyed by week
    #[default]
    Json,

    /// JSON Lines - one summary per line
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns the feature that must be enabled to write this format.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            OutputFormat::Csv => "csv-output",
        }
    }

    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`WeekpackError::InvalidFormat`] for unknown or missing
    /// extensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        ext.parse().map_err(|_| {
            WeekpackError::invalid_format(format!(
                "Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv"
            ))
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = WeekpackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(WeekpackError::invalid_format(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            ))),
        }
    }
}

fn missing_feature(format: OutputFormat) -> WeekpackError {
    WeekpackError::invalid_format(format!(
        "Output format {format} requires the '{}' feature to be enabled",
        format.required_feature()
    ))
}

/// Writes summaries to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    summaries: &WeeklySummaries,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(summaries, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(summaries, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(summaries, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts summaries to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(summaries: &WeeklySummaries, format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(summaries),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(summaries),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(summaries),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("jsonl").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);

        let err = OutputFormat::from_str("xml").unwrap_err();
        assert!(matches!(err, WeekpackError::InvalidFormat { .. }));
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("weeks.json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("weeks.ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(
            OutputFormat::from_path("/path/to/weeks.CSV").unwrap(),
            OutputFormat::Csv
        );
        assert!(OutputFormat::from_path("weeks.txt").is_err());
        assert!(OutputFormat::from_path("weeks").is_err());
    }

    #[test]
    fn test_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[cfg(all(feature = "json-output", feature = "csv-output"))]
    #[test]
    fn test_to_format_string_empty() {
        let empty = WeeklySummaries::new();
        assert_eq!(to_format_string(&empty, OutputFormat::Json).unwrap(), "{}");
        assert_eq!(to_format_string(&empty, OutputFormat::Jsonl).unwrap(), "");
        assert!(to_format_string(&empty, OutputFormat::Csv).unwrap().starts_with("week_key;"));
    }
}
