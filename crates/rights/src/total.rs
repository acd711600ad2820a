//! Summation of synthesized series into one total.

use headgate_calendar::Interval;
use headgate_series::TimeSeries;
use tracing::debug;

use crate::error::RightsError;

/// Sums `series` into a single series named `id`.
///
/// The total spans the union of all input periods. Each input adds its
/// non-missing values over its own period, then holds its last value
/// constant from the step after its end through the end of the union. An
/// input whose final value is missing is not carried forward.
///
/// # Errors
///
/// Returns [`RightsError::InvalidInput`] for an empty list, irregular inputs,
/// or differing intervals, and [`RightsError::UnitsMismatch`] when units
/// differ.
#[tracing::instrument(skip(series), fields(n_series = series.len()))]
pub fn total_series(series: &[TimeSeries], id: &str) -> Result<TimeSeries, RightsError> {
    let Some(first) = series.first() else {
        return Err(RightsError::InvalidInput {
            reason: "cannot total an empty list of series".to_string(),
        });
    };
    let interval = first.interval();
    if interval == Interval::Irregular {
        return Err(RightsError::InvalidInput {
            reason: "irregular series cannot be totaled".to_string(),
        });
    }

    let mut start = first.date1();
    let mut end = first.date2();
    for s in &series[1..] {
        if s.interval() != interval {
            return Err(RightsError::InvalidInput {
                reason: format!(
                    "series {:?} has interval {}, expected {interval}",
                    s.id(),
                    s.interval()
                ),
            });
        }
        if s.units() != first.units() {
            return Err(RightsError::UnitsMismatch {
                expected: first.units().to_string(),
                got: s.units().to_string(),
            });
        }
        start = start.min(s.date1());
        end = end.max(s.date2());
    }

    let mut total = TimeSeries::regular(id, interval, start, end, first.units().clone(), 0.0)?;
    for s in series {
        for (date, value) in s.iter() {
            if !s.is_missing(value) {
                total.add(date, value)?;
            }
        }

        let Some(last) = s.last_value() else {
            debug!(series = s.id(), "last value missing, not carried forward");
            continue;
        };
        if let Some(end_idx) = total.index_of(s.date2()) {
            for idx in end_idx + 1..total.len() {
                total.add_at(idx, last);
            }
        }
    }

    debug!(start = %total.date1(), end = %total.date2(), "totaled series");
    Ok(total)
}
