//! Series data intervals and month-length tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Spacing between consecutive values of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One value per calendar day.
    Day,
    /// One value per calendar month.
    Month,
    /// One value per calendar year.
    Year,
    /// Values only at the dates where something changes.
    Irregular,
}

impl Interval {
    /// Returns `true` for intervals with a fixed calendar step.
    pub fn is_regular(self) -> bool {
        !matches!(self, Interval::Irregular)
    }

    /// Lower-case name used in configuration files and output.
    pub fn name(self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Month => "month",
            Interval::Year => "year",
            Interval::Irregular => "irregular",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interval {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Interval::Day),
            "month" | "monthly" => Ok(Interval::Month),
            "year" | "yearly" | "annual" => Ok(Interval::Year),
            "irregular" => Ok(Interval::Irregular),
            _ => Err(CalendarError::UnknownInterval {
                name: s.to_string(),
            }),
        }
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    if month == 2 && is_leap_year(year) {
        return Ok(29);
    }
    Ok(DAYS_PER_MONTH[month as usize])
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}
