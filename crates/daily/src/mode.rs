//! Disaggregation mode selection.

use std::fmt;

/// Flag value that requests flat disaggregation.
pub const FLAT_FLAG: &str = "0";

/// How a daily series is obtained for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyMode {
    /// Spread each monthly volume evenly over the days of its month.
    Flat,
    /// Reuse the location's own daily series.
    Direct,
    /// Scale another location's daily series to match the monthly totals.
    Pattern {
        /// Id of the daily template series.
        template_id: String,
    },
}

impl fmt::Display for DailyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyMode::Flat => f.write_str("flat"),
            DailyMode::Direct => f.write_str("direct"),
            DailyMode::Pattern { template_id } => write!(f, "pattern({template_id})"),
        }
    }
}

/// Selects the mode for series `id` from its daily flag.
///
/// `"0"` is flat, a flag equal to `id` is direct, and anything else names
/// the template series for pattern scaling.
pub fn select_mode(id: &str, daily_flag: &str) -> DailyMode {
    let flag = daily_flag.trim();
    if flag == FLAT_FLAG {
        DailyMode::Flat
    } else if flag == id.trim() {
        DailyMode::Direct
    } else {
        DailyMode::Pattern {
            template_id: flag.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_zero_is_flat() {
        assert_eq!(select_mode("0801001", "0"), DailyMode::Flat);
        assert_eq!(select_mode("0801001", " 0 "), DailyMode::Flat);
    }

    #[test]
    fn own_id_is_direct() {
        assert_eq!(select_mode("0801001", "0801001"), DailyMode::Direct);
    }

    #[test]
    fn other_id_is_pattern() {
        assert_eq!(
            select_mode("0801001", "08010500"),
            DailyMode::Pattern {
                template_id: "08010500".to_string()
            }
        );
    }

    #[test]
    fn display() {
        assert_eq!(select_mode("a", "b").to_string(), "pattern(b)");
        assert_eq!(DailyMode::Flat.to_string(), "flat");
    }
}
