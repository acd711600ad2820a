//! Step arithmetic on Gregorian dates at a given interval precision.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};

use crate::error::CalendarError;
use crate::interval::{Interval, days_in_month, days_in_year};

/// Builds a date from year, month, and day.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the triple is not a valid
/// Gregorian date.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidDate { year, month, day })
}

/// Truncates `date` to the precision of `interval`.
///
/// Month precision returns the first day of the month, year precision the
/// first day of the year. Day and irregular dates are returned unchanged.
pub fn truncate(date: NaiveDate, interval: Interval) -> NaiveDate {
    let truncated = match interval {
        Interval::Month => date.with_day(1),
        Interval::Year => date.with_day(1).and_then(|d| d.with_month(1)),
        Interval::Day | Interval::Irregular => Some(date),
    };
    // Day 1 and month 1 exist for every representable date.
    truncated.unwrap_or(date)
}

/// Moves `date` by `n` steps of `interval` (negative `n` moves backwards).
///
/// Month and year steps keep the day-of-month when possible and clamp to the
/// month end otherwise, so truncated dates stay truncated.
///
/// # Errors
///
/// Returns [`CalendarError::IrregularStep`] for [`Interval::Irregular`] and
/// [`CalendarError::Overflow`] when the result is out of range.
pub fn advance(date: NaiveDate, interval: Interval, n: i64) -> Result<NaiveDate, CalendarError> {
    match interval {
        Interval::Day => date
            .checked_add_signed(TimeDelta::try_days(n).ok_or(CalendarError::Overflow)?)
            .ok_or(CalendarError::Overflow),
        Interval::Month => shift_months(date, n),
        Interval::Year => shift_months(date, n.checked_mul(12).ok_or(CalendarError::Overflow)?),
        Interval::Irregular => Err(CalendarError::IrregularStep { interval }),
    }
}

fn shift_months(date: NaiveDate, n: i64) -> Result<NaiveDate, CalendarError> {
    let months = u32::try_from(n.unsigned_abs()).map_err(|_| CalendarError::Overflow)?;
    let shifted = if n >= 0 {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    };
    shifted.ok_or(CalendarError::Overflow)
}

/// Number of whole `interval` steps from `start` to `end`.
///
/// Both dates are truncated first; the result is negative when `end` is
/// before `start`.
///
/// # Errors
///
/// Returns [`CalendarError::IrregularStep`] for [`Interval::Irregular`].
pub fn steps_between(
    start: NaiveDate,
    end: NaiveDate,
    interval: Interval,
) -> Result<i64, CalendarError> {
    let (a, b) = (truncate(start, interval), truncate(end, interval));
    match interval {
        Interval::Day => Ok((b - a).num_days()),
        Interval::Month => {
            Ok(i64::from(b.year() - a.year()) * 12 + i64::from(b.month()) - i64::from(a.month()))
        }
        Interval::Year => Ok(i64::from(b.year() - a.year())),
        Interval::Irregular => Err(CalendarError::IrregularStep { interval }),
    }
}

/// Last calendar day covered by the step that contains `date`.
pub fn end_of_step(date: NaiveDate, interval: Interval) -> NaiveDate {
    let end = match interval {
        Interval::Day | Interval::Irregular => Some(date),
        Interval::Month => days_in_month(date.year(), date.month())
            .ok()
            .and_then(|dim| date.with_day(dim)),
        Interval::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31),
    };
    end.unwrap_or(date)
}

/// Number of calendar days covered by the step that contains `date`.
///
/// Irregular steps count as a single day.
pub fn days_in_step(date: NaiveDate, interval: Interval) -> u32 {
    match interval {
        Interval::Day | Interval::Irregular => 1,
        Interval::Month => days_in_month(date.year(), date.month()).unwrap_or(30),
        Interval::Year => days_in_year(date.year()),
    }
}
