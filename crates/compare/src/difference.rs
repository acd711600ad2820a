//! Average annual difference between two series.

use chrono::Datelike;
use headgate_series::TimeSeries;
use tracing::{debug, warn};

use crate::annual::to_annual;

/// Average annual volume difference `a - b` over the years both series
/// cover.
///
/// Both inputs are reduced with [`to_annual`] first, and only years complete
/// in both are used. With `as_percent` the result is `100 × Σ(a - b) / Σa`.
///
/// Returns `None` when the difference cannot be calculated: an input cannot
/// be reduced, no year is complete in both, or `Σa` is zero in percent form.
#[tracing::instrument(skip(a, b), fields(a = a.id(), b = b.id()))]
pub fn average_difference(a: &TimeSeries, b: &TimeSeries, as_percent: bool) -> Option<f64> {
    let (annual_a, annual_b) = match (to_annual(a), to_annual(b)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "cannot compare series");
            return None;
        }
    };

    let first = annual_a.date1().year().max(annual_b.date1().year());
    let last = annual_a.date2().year().min(annual_b.date2().year());

    let mut sum_diff = 0.0;
    let mut sum_a = 0.0;
    let mut n_years = 0usize;
    for (date, va) in annual_a.iter() {
        let year = date.year();
        if year < first || year > last || annual_a.is_missing(va) {
            continue;
        }
        let Some(vb) = annual_b.value_at(date).filter(|&v| !annual_b.is_missing(v)) else {
            continue;
        };
        sum_diff += va - vb;
        sum_a += va;
        n_years += 1;
    }

    if n_years == 0 {
        debug!("no overlapping complete year");
        return None;
    }
    if as_percent {
        if sum_a == 0.0 {
            debug!("zero total in first series");
            return None;
        }
        Some(100.0 * sum_diff / sum_a)
    } else {
        Some(sum_diff / n_years as f64)
    }
}
