//! Administration numbers and appropriation dates.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, TimeDelta};
use tracing::debug;

/// Administration numbers count days after this date.
pub const ADMIN_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1849, 12, 31) {
    Some(d) => d,
    None => panic!("admin epoch is a valid date"),
};

/// Free-water threshold that no real administration number reaches.
pub const DEFAULT_FREE_WATER_THRESHOLD: f64 = 1.0e9;

/// Scale of the five-digit fractional part of an administration number.
const FRACTION_SCALE: f64 = 100_000.0;

/// Seniority key of a water right, parsed from its administration number.
///
/// The integer part counts days after 1849-12-31 (the adjudication-adjusted
/// priority date). A non-zero five-digit fraction holds the appropriation
/// date, also in days after 1849-12-31, for rights appropriated before an
/// earlier adjudication. Lower values are senior.
#[derive(Debug, Clone)]
pub struct PriorityKey {
    text: String,
    value: f64,
}

impl PriorityKey {
    /// Parses an administration number.
    ///
    /// Never fails: empty, unparsable, non-finite, or negative text is
    /// treated as missing and becomes `0.0`, the most senior key.
    pub fn from_admin_number(text: &str) -> Self {
        let trimmed = text.trim();
        let value = match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                debug!(admin = trimmed, "unparsable administration number, using 0");
                0.0
            }
        };
        Self {
            text: trimmed.to_string(),
            value,
        }
    }

    /// Builds a key from a numeric administration value.
    pub fn from_value(value: f64) -> Self {
        Self::from_admin_number(&format!("{value:.5}"))
    }

    /// Original administration-number text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Numeric administration value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns `true` when the right is free water under `threshold`.
    pub fn is_free_water(&self, threshold: f64) -> bool {
        self.value >= threshold
    }

    /// Calendar appropriation date.
    ///
    /// Values too large for the calendar saturate at [`NaiveDate::MAX`].
    pub fn appropriation_date(&self) -> NaiveDate {
        let whole = self.value.trunc();
        let fraction = ((self.value - whole) * FRACTION_SCALE).round();
        let days = if fraction > 0.0 { fraction } else { whole };
        TimeDelta::try_days(days as i64)
            .and_then(|delta| ADMIN_EPOCH.checked_add_signed(delta))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl fmt::Display for PriorityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zero_is_epoch() {
        let key = PriorityKey::from_admin_number("0.00000");
        assert_eq!(key.appropriation_date(), ADMIN_EPOCH);
    }

    #[test]
    fn whole_days_after_epoch() {
        // 1850-01-01 is one day after the epoch; 2000-01-01 is 54787 days after.
        assert_eq!(
            PriorityKey::from_admin_number("1.00000").appropriation_date(),
            d(1850, 1, 1)
        );
        assert_eq!(
            PriorityKey::from_admin_number("54787.00000").appropriation_date(),
            d(2000, 1, 1)
        );
    }

    #[test]
    fn fraction_holds_appropriation_date() {
        // Adjudicated 2000-01-01, appropriated 1900-01-01 (18263 days).
        let key = PriorityKey::from_admin_number("54787.18263");
        assert_eq!(key.appropriation_date(), d(1900, 1, 1));
    }

    #[test]
    fn malformed_is_most_senior() {
        for text in ["", "abc", "NaN", "-5", "inf"] {
            let key = PriorityKey::from_admin_number(text);
            assert_eq!(key.value(), 0.0, "text {text:?}");
        }
        let senior = PriorityKey::from_admin_number("junk");
        let real = PriorityKey::from_admin_number("12345.00000");
        assert!(senior < real);
    }

    #[test]
    fn ordering_by_value() {
        let a = PriorityKey::from_admin_number("100000.00000");
        let b = PriorityKey::from_admin_number("200000.00000");
        assert!(a < b);
        assert_eq!(a, PriorityKey::from_value(100000.0));
    }

    #[test]
    fn free_water_threshold() {
        let key = PriorityKey::from_admin_number("99999.99999");
        assert!(key.is_free_water(90000.0));
        assert!(!key.is_free_water(DEFAULT_FREE_WATER_THRESHOLD));
        assert!(PriorityKey::from_admin_number("90000").is_free_water(90000.0));
    }

    #[test]
    fn huge_value_saturates() {
        let key = PriorityKey::from_value(1.0e15);
        assert_eq!(key.appropriation_date(), NaiveDate::MAX);
    }

    #[test]
    fn display_five_decimals() {
        let key = PriorityKey::from_admin_number("  45678.5 ");
        assert_eq!(key.to_string(), "45678.50000");
        assert_eq!(key.text(), "45678.5");
    }
}
