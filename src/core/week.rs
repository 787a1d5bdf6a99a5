//! ISO-8601 calendar weeks.
//!
//! Weeks run Monday to Sunday, and week 1 of an ISO year is the week holding
//! that year's first Thursday. Late-December dates can therefore belong to
//! week 1 of the next ISO year, and early-January dates to week 52 or 53 of
//! the previous one.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use weekpack::core::week::{week_key, week_range};
//!
//! // Monday 30 December 2024 is in week 1 of ISO year 2025.
//! let ts = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! assert_eq!(week_key(ts), "2025-W01");
//!
//! let (start, end) = week_range(ts);
//! assert_eq!(start.to_string(), "2024-12-30 00:00:00");
//! assert_eq!(end.to_string(), "2025-01-05 23:59:59");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::WeekpackError;

/// An ISO year and week number.
///
/// Orders chronologically and displays as `YYYY-Wnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    /// ISO week-numbering year (may differ from the calendar year).
    pub iso_year: i32,
    /// ISO week number, 1 to 53.
    pub week: u32,
}

impl WeekKey {
    /// Returns the ISO week containing `ts`.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        let iso = ts.date().iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }

    /// Returns Monday 00:00:00 and Sunday 23:59:59 of this week.
    ///
    /// Returns `None` if the week does not exist in its ISO year.
    pub fn range(self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let monday = NaiveDate::from_isoywd_opt(self.iso_year, self.week, Weekday::Mon)?;
        let start = monday.and_hms_opt(0, 0, 0)?;
        let end = start + Duration::days(7) - Duration::seconds(1);
        Some((start, end))
    }
}

impl From<NaiveDateTime> for WeekKey {
    fn from(ts: NaiveDateTime) -> Self {
        Self::from_timestamp(ts)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.iso_year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = WeekpackError;

    /// Parses `YYYY-Wnn`. The week must exist in that ISO year, so
    /// `2020-W53` parses but `2021-W53` does not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WeekpackError::invalid_week_key(s);

        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(week.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let key = WeekKey {
            iso_year: year.parse().map_err(|_| invalid())?,
            week: week.parse().map_err(|_| invalid())?,
        };
        key.range().ok_or_else(invalid)?;
        Ok(key)
    }
}

/// Returns the `YYYY-Wnn` key of the ISO week containing `ts`.
pub fn week_key(ts: NaiveDateTime) -> String {
    WeekKey::from_timestamp(ts).to_string()
}

/// Returns Monday 00:00:00 and Sunday 23:59:59 of the ISO week containing
/// `ts`, derived from its ISO year, week and weekday.
pub fn week_range(ts: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    WeekKey::from_timestamp(ts)
        .range()
        .expect("the ISO week of an existing date exists")
}
