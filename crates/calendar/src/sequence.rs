//! Date sequence generation for regular intervals.

use chrono::NaiveDate;

use crate::date::{advance, steps_between, truncate};
use crate::error::CalendarError;
use crate::interval::Interval;

/// Generates every step date from `start` through `end` inclusive.
///
/// Both bounds are truncated to the interval precision first, so a monthly
/// sequence always holds first-of-month dates. An `end` before `start`
/// yields an empty sequence.
///
/// # Errors
///
/// Returns [`CalendarError::IrregularStep`] for [`Interval::Irregular`].
///
/// # Example
///
/// ```ignore
/// let dates = date_sequence(ymd(2000, 11, 15)?, ymd(2001, 1, 3)?, Interval::Month)?;
/// // Nov 1 2000, Dec 1 2000, Jan 1 2001
/// assert_eq!(dates.len(), 3);
/// ```
pub fn date_sequence(
    start: NaiveDate,
    end: NaiveDate,
    interval: Interval,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let n_steps = steps_between(start, end, interval)?;
    if n_steps < 0 {
        return Ok(Vec::new());
    }
    let first = truncate(start, interval);
    let mut dates = Vec::with_capacity(n_steps as usize + 1);
    dates.push(first);
    for i in 1..=n_steps {
        dates.push(advance(first, interval, i)?);
    }
    Ok(dates)
}
