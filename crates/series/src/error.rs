//! Error types for the headgate-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the headgate-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a period ends before it starts.
    #[error("period ends before it starts: {date1} > {date2}")]
    InvertedPeriod {
        /// Requested start.
        date1: NaiveDate,
        /// Requested end.
        date2: NaiveDate,
    },

    /// Returned when a series would hold no values.
    #[error("series has no values")]
    EmptySeries,

    /// Returned when a date is not one of the series' step dates.
    #[error("date {date} is outside the series period")]
    DateOutOfRange {
        /// The offending date.
        date: NaiveDate,
    },

    /// Returned when irregular points are not strictly increasing.
    #[error("irregular dates must be strictly increasing (at {date})")]
    UnsortedDates {
        /// First date that breaks the ordering.
        date: NaiveDate,
    },

    /// Returned when a regular-interval operation is given an irregular series.
    #[error("{operation} requires a regular interval")]
    IrregularNotSupported {
        /// Name of the operation.
        operation: &'static str,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] headgate_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_inverted_period() {
        let e = SeriesError::InvertedPeriod {
            date1: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            date2: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "period ends before it starts: 2001-01-01 > 2000-01-01"
        );
    }

    #[test]
    fn display_empty() {
        assert_eq!(SeriesError::EmptySeries.to_string(), "series has no values");
    }

    #[test]
    fn display_irregular() {
        let e = SeriesError::IrregularNotSupported {
            operation: "total",
        };
        assert_eq!(e.to_string(), "total requires a regular interval");
    }

    #[test]
    fn from_calendar_error() {
        let ce = headgate_calendar::CalendarError::InvalidMonth { month: 0 };
        let se: SeriesError = ce.into();
        assert!(matches!(se, SeriesError::Calendar(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
