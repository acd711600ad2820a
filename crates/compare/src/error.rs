//! Error types for the headgate-compare crate.

/// Error type for all fallible operations in the headgate-compare crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    /// Returned when an irregular series is reduced to annual values.
    #[error("series {id} is irregular and cannot be reduced to annual values")]
    IrregularSeries {
        /// Id of the series.
        id: String,
    },

    /// Series error.
    #[error(transparent)]
    Series(#[from] headgate_series::SeriesError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] headgate_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_irregular() {
        let e = CompareError::IrregularSeries {
            id: "0801001".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "series 0801001 is irregular and cannot be reduced to annual values"
        );
    }

    #[test]
    fn display_transparent_series() {
        let e = CompareError::from(headgate_series::SeriesError::EmptySeries);
        assert_eq!(e.to_string(), "series has no values");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompareError>();
    }
}
