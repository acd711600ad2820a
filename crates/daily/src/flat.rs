//! Even spreading of monthly volumes over their days.

use chrono::Datelike;
use headgate_calendar::{Interval, days_in_month, end_of_step};
use headgate_series::{CFS_DAY_TO_ACFT, DEFAULT_MISSING, DataUnits, TimeSeries};

use crate::error::DailyError;

/// Spreads a monthly volume series over the days of each month.
///
/// With flow output every day holds the month's average flow,
/// `volume / (1.9835 × days_in_month)`. Otherwise every day repeats the
/// monthly value. Missing months stay missing.
pub(crate) fn spread_monthly(
    id: &str,
    monthly: &TimeSeries,
    output_units: &DataUnits,
) -> Result<TimeSeries, DailyError> {
    let to_flow = output_units.is_flow();
    let units = if to_flow {
        output_units.clone()
    } else {
        monthly.units().clone()
    };
    let start = monthly.date1();
    let end = end_of_step(monthly.date2(), Interval::Month);
    let mut daily = TimeSeries::regular(id, Interval::Day, start, end, units, DEFAULT_MISSING)?
        .with_missing(monthly.missing());

    for (month, value) in monthly.iter() {
        if monthly.is_missing(value) {
            continue;
        }
        let dim = days_in_month(month.year(), month.month())?;
        let per_day = if to_flow {
            value / (CFS_DAY_TO_ACFT * f64::from(dim))
        } else {
            value
        };
        for day in month.iter_days().take(dim as usize) {
            daily.set(day, per_day)?;
        }
    }
    Ok(daily)
}
