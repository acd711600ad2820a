//! Options for daily estimation.

use headgate_series::DataUnits;

/// Configuration for [`estimate_daily`](crate::estimate_daily).
///
/// # Example
///
/// ```
/// use headgate_daily::DailyOptions;
/// use headgate_series::DataUnits;
///
/// let options = DailyOptions::new().with_output_units(DataUnits::Acft);
/// assert!(!options.output_units().is_flow());
/// ```
#[derive(Debug, Clone)]
pub struct DailyOptions {
    output_units: DataUnits,
    calculate: bool,
}

impl DailyOptions {
    /// Creates options with defaults: CFS output, pattern scaling enabled.
    pub fn new() -> Self {
        Self {
            output_units: DataUnits::Cfs,
            calculate: true,
        }
    }

    /// Sets the units requested from flat disaggregation.
    pub fn with_output_units(mut self, units: DataUnits) -> Self {
        self.output_units = units;
        self
    }

    /// Sets whether pattern mode scales the template (`true`) or returns it
    /// unchanged (`false`).
    pub fn with_calculate(mut self, calculate: bool) -> Self {
        self.calculate = calculate;
        self
    }

    /// Returns the requested output units.
    pub fn output_units(&self) -> &DataUnits {
        &self.output_units
    }

    /// Returns whether pattern mode scales the template.
    pub fn calculate(&self) -> bool {
        self.calculate
    }
}

impl Default for DailyOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DailyOptions::default();
        assert_eq!(options.output_units(), &DataUnits::Cfs);
        assert!(options.calculate());
    }

    #[test]
    fn builder() {
        let options = DailyOptions::new()
            .with_output_units(DataUnits::AcftPerMonth)
            .with_calculate(false);
        assert_eq!(options.output_units(), &DataUnits::AcftPerMonth);
        assert!(!options.calculate());
    }
}
