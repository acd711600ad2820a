//! Data units carried by series and right decrees.

use std::fmt;

use serde::{Serialize, Serializer};

/// Acre-feet delivered by a flow of one cubic foot per second over one day
/// (86400 / 43560).
pub const CFS_DAY_TO_ACFT: f64 = 1.9835;

/// Units of a decree or of series values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataUnits {
    /// Cubic feet per second.
    Cfs,
    /// Acre-feet accumulated over one series step.
    Acft,
    /// Acre-feet per month.
    AcftPerMonth,
    /// Any other unit string, kept verbatim.
    Other(String),
}

impl DataUnits {
    /// Parses a unit abbreviation. Unknown strings become [`DataUnits::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "CFS" => DataUnits::Cfs,
            "ACFT" | "AF" => DataUnits::Acft,
            "AF/M" | "ACFT/M" | "AF/MO" => DataUnits::AcftPerMonth,
            _ => DataUnits::Other(s.trim().to_string()),
        }
    }

    /// Canonical abbreviation.
    pub fn as_str(&self) -> &str {
        match self {
            DataUnits::Cfs => "CFS",
            DataUnits::Acft => "ACFT",
            DataUnits::AcftPerMonth => "AF/M",
            DataUnits::Other(s) => s,
        }
    }

    /// Returns `true` for flow-rate units.
    pub fn is_flow(&self) -> bool {
        matches!(self, DataUnits::Cfs)
    }

    /// Returns `true` for volume units.
    ///
    /// [`DataUnits::Acft`] and [`DataUnits::AcftPerMonth`] share this
    /// dimension. A volume is a per-step amount: it is not rescaled when
    /// moved between volume units, whatever the series interval.
    pub fn is_volume(&self) -> bool {
        matches!(self, DataUnits::Acft | DataUnits::AcftPerMonth)
    }
}

impl fmt::Display for DataUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DataUnits {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for DataUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Converts a volume spread over `days` days into an average flow in cfs.
pub fn acft_to_cfs(volume: f64, days: f64) -> f64 {
    volume / (CFS_DAY_TO_ACFT * days)
}

/// Converts a flow held for `days` days into a volume in acre-feet.
pub fn cfs_to_acft(flow: f64, days: f64) -> f64 {
    flow * CFS_DAY_TO_ACFT * days
}
