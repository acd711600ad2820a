//! Error types for the headgate-daily crate.

use headgate_calendar::Interval;

/// Reason a daily series cannot be estimated.
///
/// Estimation is advisory, so these are reported as diagnostics and the
/// public entry points return `None`/`false` rather than an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DailyError {
    /// Returned when the mode needs a monthly series and none was given.
    #[error("no monthly series for {id}")]
    MissingMonthly {
        /// Series id being estimated.
        id: String,
    },

    /// Returned when the mode needs a daily series and none was given.
    #[error("no daily series {daily_id} to estimate {id}")]
    MissingDaily {
        /// Series id being estimated.
        id: String,
        /// Id of the required daily series.
        daily_id: String,
    },

    /// Returned when an input series has the wrong interval.
    #[error("{role} series has interval {got}, expected {expected}")]
    WrongInterval {
        /// Which input (`"monthly"`, `"daily"`, `"template"`).
        role: &'static str,
        /// Interval the mode requires.
        expected: Interval,
        /// Interval of the series.
        got: Interval,
    },

    /// Returned when an input series has units the mode cannot use.
    #[error("{role} series units {units} are not {expected}")]
    UnsupportedUnits {
        /// Which input (`"monthly"`, `"template"`).
        role: &'static str,
        /// Units of the series.
        units: String,
        /// What the mode requires.
        expected: &'static str,
    },

    /// Series error.
    #[error(transparent)]
    Series(#[from] headgate_series::SeriesError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] headgate_calendar::CalendarError),
}
