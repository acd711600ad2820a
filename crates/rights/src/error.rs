//! Error types for the headgate-rights crate.

/// Error type for all fallible operations in the headgate-rights crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RightsError {
    /// Returned when a record, policy, or option combination is invalid.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when series or decree units cannot be combined.
    #[error("units mismatch: expected {expected}, got {got}")]
    UnitsMismatch {
        /// Units already in use.
        expected: String,
        /// Units that could not be combined with them.
        got: String,
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
    fn display_invalid_input() {
        let e = RightsError::InvalidInput {
            reason: "right_id is empty".to_string(),
        };
        assert_eq!(e.to_string(), "invalid input: right_id is empty");
    }

    #[test]
    fn display_units_mismatch() {
        let e = RightsError::UnitsMismatch {
            expected: "CFS".to_string(),
            got: "ACFT".to_string(),
        };
        assert_eq!(e.to_string(), "units mismatch: expected CFS, got ACFT");
    }

    #[test]
    fn from_series_error() {
        let se = headgate_series::SeriesError::EmptySeries;
        let re: RightsError = se.into();
        assert!(matches!(re, RightsError::Series(_)));
    }

    #[test]
    fn from_calendar_error() {
        let ce = headgate_calendar::CalendarError::Overflow;
        let re: RightsError = ce.into();
        assert!(matches!(re, RightsError::Calendar(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<RightsError>();
    }
}
