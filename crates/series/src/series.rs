//! Date-indexed numeric series.

use chrono::NaiveDate;
use headgate_calendar::{Interval, date_sequence, steps_between, truncate};
use serde::Serialize;

use crate::error::SeriesError;
use crate::units::DataUnits;

/// Default missing-value sentinel.
pub const DEFAULT_MISSING: f64 = -999.0;

/// An ordered, date-indexed series of values.
///
/// Regular series hold one value per interval step from `date1` through
/// `date2` (both truncated to the interval precision). Irregular series hold
/// one value per explicit, strictly increasing date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    id: String,
    interval: Interval,
    date1: NaiveDate,
    date2: NaiveDate,
    units: DataUnits,
    missing: f64,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Allocates a regular series over `[date1, date2]` with every step set
    /// to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::IrregularNotSupported`] for an irregular
    /// interval and [`SeriesError::InvertedPeriod`] when `date2 < date1`
    /// after truncation.
    pub fn regular(
        id: impl Into<String>,
        interval: Interval,
        date1: NaiveDate,
        date2: NaiveDate,
        units: DataUnits,
        fill: f64,
    ) -> Result<Self, SeriesError> {
        if !interval.is_regular() {
            return Err(SeriesError::IrregularNotSupported {
                operation: "regular allocation",
            });
        }
        let (d1, d2) = (truncate(date1, interval), truncate(date2, interval));
        if d2 < d1 {
            return Err(SeriesError::InvertedPeriod {
                date1: d1,
                date2: d2,
            });
        }
        let dates = date_sequence(d1, d2, interval)?;
        let values = vec![fill; dates.len()];
        Ok(Self {
            id: id.into(),
            interval,
            date1: d1,
            date2: d2,
            units,
            missing: DEFAULT_MISSING,
            dates,
            values,
        })
    }

    /// Builds a regular series starting at `date1` from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptySeries`] when `values` is empty.
    pub fn from_values(
        id: impl Into<String>,
        interval: Interval,
        date1: NaiveDate,
        units: DataUnits,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if values.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        let n_steps = values.len() as i64 - 1;
        let date2 = headgate_calendar::advance(truncate(date1, interval), interval, n_steps)?;
        let mut series = Self::regular(id, interval, date1, date2, units, 0.0)?;
        series.values = values;
        Ok(series)
    }

    /// Builds an irregular series from `(date, value)` points.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptySeries`] for no points and
    /// [`SeriesError::UnsortedDates`] when dates are not strictly increasing.
    pub fn irregular(
        id: impl Into<String>,
        units: DataUnits,
        points: Vec<(NaiveDate, f64)>,
    ) -> Result<Self, SeriesError> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f.0, l.0),
            _ => return Err(SeriesError::EmptySeries),
        };
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SeriesError::UnsortedDates { date: pair[1].0 });
            }
        }
        let (dates, values) = points.into_iter().unzip();
        Ok(Self {
            id: id.into(),
            interval: Interval::Irregular,
            date1: first,
            date2: last,
            units,
            missing: DEFAULT_MISSING,
            dates,
            values,
        })
    }

    /// Replaces the missing-value sentinel. Values equal to the old sentinel
    /// are rewritten to the new one.
    pub fn with_missing(mut self, missing: f64) -> Self {
        let old = self.missing;
        for v in &mut self.values {
            if *v == old {
                *v = missing;
            }
        }
        self.missing = missing;
        self
    }

    /// Replaces the series identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the series identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the data interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the first date.
    pub fn date1(&self) -> NaiveDate {
        self.date1
    }

    /// Returns the last date.
    pub fn date2(&self) -> NaiveDate {
        self.date2
    }

    /// Returns the data units.
    pub fn units(&self) -> &DataUnits {
        &self.units
    }

    /// Returns the missing-value sentinel.
    pub fn missing(&self) -> f64 {
        self.missing
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Step dates, parallel to [`values`](Self::values).
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Raw values, including missing sentinels.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns `true` if `value` is the missing sentinel or NaN.
    pub fn is_missing(&self, value: f64) -> bool {
        value.is_nan() || value == self.missing
    }

    /// Position of `date` in the series, if it is one of its step dates.
    ///
    /// Regular series match any date within a step (a monthly series maps
    /// every day of March to the March value).
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if self.interval.is_regular() {
            let idx = steps_between(self.date1, date, self.interval).ok()?;
            usize::try_from(idx).ok().filter(|&i| i < self.values.len())
        } else {
            self.dates.binary_search(&date).ok()
        }
    }

    /// Value at `date`, or `None` if the date is outside the series.
    ///
    /// The returned value may be the missing sentinel.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.index_of(date).map(|i| self.values[i])
    }

    /// Sets the value at `date`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DateOutOfRange`] if `date` is not in the series.
    pub fn set(&mut self, date: NaiveDate, value: f64) -> Result<(), SeriesError> {
        let idx = self
            .index_of(date)
            .ok_or(SeriesError::DateOutOfRange { date })?;
        self.values[idx] = value;
        Ok(())
    }

    /// Adds `value` at `date`. A missing current value is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DateOutOfRange`] if `date` is not in the series.
    pub fn add(&mut self, date: NaiveDate, value: f64) -> Result<(), SeriesError> {
        let idx = self
            .index_of(date)
            .ok_or(SeriesError::DateOutOfRange { date })?;
        self.add_at(idx, value);
        Ok(())
    }

    /// Adds `value` at position `idx`. A missing current value is replaced.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    pub fn add_at(&mut self, idx: usize, value: f64) {
        let current = self.values[idx];
        self.values[idx] = if self.is_missing(current) {
            value
        } else {
            current + value
        };
    }

    /// Iterates over `(date, value)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `date2`, unless it is missing.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied().filter(|&v| !self.is_missing(v))
    }
}
