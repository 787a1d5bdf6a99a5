//! Unified error types for weekpack.
//!
//! The parsing and windowing core is permissive and never fails on transcript
//! content. Errors only surface at the edges: reading files, loading settings,
//! writing output, and checking the preconditions of the aggregation step.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for weekpack operations.
///
/// # Example
///
/// ```rust
/// use weekpack::error::Result;
/// use weekpack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, WeekpackError>;

/// The error type for all weekpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WeekpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The settings file could not be parsed.
    #[cfg(feature = "config-file")]
    #[error("Invalid settings file: {0}")]
    Config(#[from] toml::de::Error),

    /// Invalid date in a filter bound.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A week key string that is not of the form `YYYY-Wnn`, or names a week
    /// that does not exist in that ISO year.
    #[error("Invalid week key '{input}'. Expected format: YYYY-Wnn")]
    InvalidWeekKey {
        /// The rejected input
        input: String,
    },

    /// A configuration value is unusable (for example an empty target user).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// Unknown or unavailable output format.
    #[error("Invalid output format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// Messages handed to the aggregator are not in chronological order.
    #[error("Messages are not sorted by timestamp (first out-of-order index: {index})")]
    UnsortedInput {
        /// Index of the first message whose timestamp precedes its predecessor's
        index: usize,
    },

    /// UTF-8 encoding error.
    ///
    /// Occurs when output bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for WeekpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WeekpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl WeekpackError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        WeekpackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid week key error.
    pub fn invalid_week_key(input: impl Into<String>) -> Self {
        WeekpackError::InvalidWeekKey {
            input: input.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        WeekpackError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid output format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        WeekpackError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an unsorted-input error.
    pub fn unsorted(index: usize) -> Self {
        WeekpackError::UnsortedInput { index }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, WeekpackError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, WeekpackError::InvalidDate { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        match self {
            WeekpackError::InvalidConfig { .. } => true,
            #[cfg(feature = "config-file")]
            WeekpackError::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if the aggregator's ordering precondition was violated.
    pub fn is_unsorted(&self) -> bool {
        matches!(self, WeekpackError::UnsortedInput { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
