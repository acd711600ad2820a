//! Reduction of series to annual totals.

use chrono::Datelike;
use headgate_calendar::{Interval, days_in_step, days_in_year, ymd};
use headgate_series::{DEFAULT_MISSING, DataUnits, TimeSeries, cfs_to_acft};
use tracing::debug;

use crate::error::CompareError;

/// Reduces `series` to one volume per calendar year.
///
/// Flow steps are first converted to the acre-feet they deliver over their
/// own step, so daily and monthly flow series reduce to the same total.
/// Volume steps are summed as they are. A year with any missing or absent
/// step is missing in the result. Annual volume series are returned as-is.
///
/// # Errors
///
/// Returns [`CompareError::IrregularSeries`] for irregular input.
pub fn to_annual(series: &TimeSeries) -> Result<TimeSeries, CompareError> {
    let interval = series.interval();
    if interval == Interval::Irregular {
        return Err(CompareError::IrregularSeries {
            id: series.id().to_string(),
        });
    }
    let is_flow = series.units().is_flow();
    if interval == Interval::Year && !is_flow {
        return Ok(series.clone());
    }

    let first_year = series.date1().year();
    let last_year = series.date2().year();
    let n_years = (last_year - first_year + 1) as usize;
    let mut sums = vec![0.0; n_years];
    let mut counts = vec![0u32; n_years];
    let mut gaps = vec![false; n_years];

    for (date, value) in series.iter() {
        let y = (date.year() - first_year) as usize;
        if series.is_missing(value) {
            gaps[y] = true;
            continue;
        }
        sums[y] += if is_flow {
            cfs_to_acft(value, f64::from(days_in_step(date, interval)))
        } else {
            value
        };
        counts[y] += 1;
    }

    let values: Vec<f64> = (0..n_years)
        .map(|y| {
            let year = first_year + y as i32;
            let expected = match interval {
                Interval::Year => 1,
                Interval::Month => 12,
                _ => days_in_year(year),
            };
            if gaps[y] || counts[y] != expected {
                DEFAULT_MISSING
            } else {
                sums[y]
            }
        })
        .collect();
    debug!(id = series.id(), n_years, is_flow, "reduced to annual values");

    let units = if is_flow {
        DataUnits::Acft
    } else {
        series.units().clone()
    };
    let annual = TimeSeries::from_values(
        series.id(),
        Interval::Year,
        ymd(first_year, 1, 1)?,
        units,
        values,
    )?;
    Ok(annual.with_missing(series.missing()))
}
