//! Error types for the headgate-calendar crate.

use crate::interval::Interval;

/// Error type for all fallible operations in the headgate-calendar crate.
///
/// Covers month and date validation plus step arithmetic that is only
/// defined for regular intervals.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a year/month/day triple is not a Gregorian date.
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
        /// Day within the month.
        day: u32,
    },

    /// Returned when step arithmetic is requested for an interval without
    /// a fixed step.
    #[error("interval {interval} has no regular step")]
    IrregularStep {
        /// The offending interval.
        interval: Interval,
    },

    /// Returned when date arithmetic leaves the representable range.
    #[error("date arithmetic overflowed")]
    Overflow,

    /// Returned when an interval name cannot be parsed.
    #[error("unknown interval: {name:?}")]
    UnknownInterval {
        /// The unparsed name.
        name: String,
    },
}
