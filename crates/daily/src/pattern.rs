//! Scaling of a daily template to monthly targets.

use chrono::{Datelike, NaiveDate};
use headgate_calendar::{Interval, days_in_month};
use headgate_series::{CFS_DAY_TO_ACFT, DataUnits, TimeSeries};
use tracing::debug;

use crate::error::DailyError;

/// Scales `template` month by month so each month averages the daily
/// equivalent of the matching `monthly` value.
///
/// For each month the ratio is `target / (template_sum / present_days)`,
/// counting only non-missing template days. Missing template days take the
/// target itself. A month whose template mean is zero is filled with the
/// target. Months without a monthly value come out missing.
pub(crate) fn scale_template(
    id: &str,
    monthly: &TimeSeries,
    template: &TimeSeries,
) -> Result<TimeSeries, DailyError> {
    let dates = template.dates();
    let mut values = template.values().to_vec();
    let missing = template.missing();

    let mut start = 0;
    while start < dates.len() {
        let month = month_key(dates[start]);
        let end = dates[start..]
            .iter()
            .position(|&d| month_key(d) != month)
            .map_or(dates.len(), |offset| start + offset);

        match target_daily_mean(monthly, template.units(), dates[start])? {
            Some(target) => scale_month(&mut values[start..end], target, |v| {
                template.is_missing(v)
            }),
            None => values[start..end].fill(missing),
        }
        start = end;
    }

    let series = TimeSeries::from_values(
        id,
        Interval::Day,
        template.date1(),
        template.units().clone(),
        values,
    )?;
    Ok(series.with_missing(missing))
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

fn scale_month(days: &mut [f64], target: f64, is_missing: impl Fn(f64) -> bool) {
    let (sum, present) = days
        .iter()
        .filter(|&&v| !is_missing(v))
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));

    if present == 0 || sum == 0.0 {
        days.fill(target);
        return;
    }
    let ratio = target / (sum / present as f64);
    for v in days.iter_mut() {
        *v = if is_missing(*v) { target } else { *v * ratio };
    }
}

/// Daily mean implied by the monthly value covering `date`, in the
/// template's units. `None` when the month is absent or missing.
fn target_daily_mean(
    monthly: &TimeSeries,
    template_units: &DataUnits,
    date: NaiveDate,
) -> Result<Option<f64>, DailyError> {
    let value = match monthly.value_at(date) {
        Some(v) if !monthly.is_missing(v) => v,
        _ => {
            debug!(%date, "no monthly target, month left missing");
            return Ok(None);
        }
    };
    if monthly.units().is_flow() {
        let mean = if template_units.is_volume() {
            value * CFS_DAY_TO_ACFT
        } else {
            value
        };
        return Ok(Some(mean));
    }
    let dim = f64::from(days_in_month(date.year(), date.month())?);
    let mean = if template_units.is_flow() {
        value / (CFS_DAY_TO_ACFT * dim)
    } else {
        value / dim
    };
    Ok(Some(mean))
}
