//! Options for right series synthesis.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use headgate_calendar::Interval;
use headgate_series::DataUnits;

use crate::error::RightsError;
use crate::priority::DEFAULT_FREE_WATER_THRESHOLD;

/// Effective-date handling for free-water rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreeWaterPolicy {
    /// Free-water rights use their own appropriation date.
    None,
    /// Free-water rights are on from the group's senior date or the output
    /// start, whichever is earlier.
    AlwaysOn,
    /// Free-water rights take the senior-most date of the group's other
    /// members, falling back to a caller-supplied date.
    UseSeniorRightDate,
}

impl fmt::Display for FreeWaterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FreeWaterPolicy::None => "none",
            FreeWaterPolicy::AlwaysOn => "always_on",
            FreeWaterPolicy::UseSeniorRightDate => "use_senior_right_date",
        })
    }
}

impl FromStr for FreeWaterPolicy {
    type Err = RightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(FreeWaterPolicy::None),
            "always_on" | "always-on" => Ok(FreeWaterPolicy::AlwaysOn),
            "use_senior_right_date" | "senior" => Ok(FreeWaterPolicy::UseSeniorRightDate),
            other => Err(RightsError::InvalidInput {
                reason: format!("unknown free-water policy: {other:?}"),
            }),
        }
    }
}

/// Configuration for [`build_right_series`](crate::build_right_series).
///
/// # Example
///
/// ```
/// use headgate_calendar::Interval;
/// use headgate_rights::{BuildOptions, FreeWaterPolicy};
///
/// let options = BuildOptions::new()
///     .with_interval(Interval::Day)
///     .with_free_water(90000.0, FreeWaterPolicy::AlwaysOn);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    interval: Interval,
    output_period: Option<(NaiveDate, NaiveDate)>,
    free_water_threshold: f64,
    free_water_policy: FreeWaterPolicy,
    fallback_date: Option<NaiveDate>,
    target_units: DataUnits,
}

impl BuildOptions {
    /// Creates options with defaults.
    ///
    /// Defaults: monthly interval, period taken from the group, free-water
    /// check disabled, policy `None`, no fallback date, CFS output.
    pub fn new() -> Self {
        Self {
            interval: Interval::Month,
            output_period: None,
            free_water_threshold: DEFAULT_FREE_WATER_THRESHOLD,
            free_water_policy: FreeWaterPolicy::None,
            fallback_date: None,
            target_units: DataUnits::Cfs,
        }
    }

    /// Sets the output interval.
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets an explicit output period.
    pub fn with_output_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.output_period = Some((start, end));
        self
    }

    /// Sets the free-water threshold and policy.
    pub fn with_free_water(mut self, threshold: f64, policy: FreeWaterPolicy) -> Self {
        self.free_water_threshold = threshold;
        self.free_water_policy = policy;
        self
    }

    /// Sets the date used by [`FreeWaterPolicy::UseSeniorRightDate`] when the
    /// group has no other dated member.
    pub fn with_fallback_date(mut self, date: NaiveDate) -> Self {
        self.fallback_date = Some(date);
        self
    }

    /// Sets the units of the synthesized series.
    pub fn with_target_units(mut self, units: DataUnits) -> Self {
        self.target_units = units;
        self
    }

    // --- Accessors ---

    /// Returns the output interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the explicit output period, if any.
    pub fn output_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.output_period
    }

    /// Returns the free-water threshold.
    pub fn free_water_threshold(&self) -> f64 {
        self.free_water_threshold
    }

    /// Returns the free-water policy.
    pub fn free_water_policy(&self) -> FreeWaterPolicy {
        self.free_water_policy
    }

    /// Returns the fallback date.
    pub fn fallback_date(&self) -> Option<NaiveDate> {
        self.fallback_date
    }

    /// Returns the output units.
    pub fn target_units(&self) -> &DataUnits {
        &self.target_units
    }

    /// Validates these options.
    pub fn validate(&self) -> Result<(), RightsError> {
        if let Some((start, end)) = self.output_period
            && end < start
        {
            return Err(RightsError::InvalidInput {
                reason: format!("output period ends before it starts: {start} > {end}"),
            });
        }
        if self.free_water_threshold.is_nan() {
            return Err(RightsError::InvalidInput {
                reason: "free_water_threshold must not be NaN".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}
