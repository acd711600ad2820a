//! Daily estimation entry points.

use headgate_calendar::Interval;
use headgate_series::TimeSeries;
use tracing::{debug, warn};

use crate::config::DailyOptions;
use crate::error::DailyError;
use crate::flat::spread_monthly;
use crate::mode::{DailyMode, select_mode};
use crate::pattern::scale_template;

/// Validated inputs for one estimate.
enum Plan<'a> {
    Flat { monthly: &'a TimeSeries },
    Direct { daily: &'a TimeSeries },
    Template { template: &'a TimeSeries },
    Pattern {
        monthly: &'a TimeSeries,
        template: &'a TimeSeries,
    },
}

/// Checks the inputs the selected mode needs.
///
/// `daily` is the location's own daily series in direct mode and the
/// template series in pattern mode.
fn plan<'a>(
    id: &str,
    daily_flag: &str,
    monthly: Option<&'a TimeSeries>,
    daily: Option<&'a TimeSeries>,
    options: &DailyOptions,
) -> Result<Plan<'a>, DailyError> {
    match select_mode(id, daily_flag) {
        DailyMode::Flat => {
            let monthly = require_monthly(id, monthly)?;
            if !monthly.units().is_volume() {
                return Err(DailyError::UnsupportedUnits {
                    role: "monthly",
                    units: monthly.units().to_string(),
                    expected: "a volume",
                });
            }
            Ok(Plan::Flat { monthly })
        }
        DailyMode::Direct => {
            let daily = require_daily(id, id, "daily", daily)?;
            Ok(Plan::Direct { daily })
        }
        DailyMode::Pattern { template_id } => {
            let template = require_daily(id, &template_id, "template", daily)?;
            if !options.calculate() {
                return Ok(Plan::Template { template });
            }
            let monthly = require_monthly(id, monthly)?;
            for (role, series) in [("monthly", monthly), ("template", template)] {
                let units = series.units();
                if !units.is_flow() && !units.is_volume() {
                    return Err(DailyError::UnsupportedUnits {
                        role,
                        units: units.to_string(),
                        expected: "a flow or volume",
                    });
                }
            }
            Ok(Plan::Pattern { monthly, template })
        }
    }
}

fn require_monthly<'a>(
    id: &str,
    monthly: Option<&'a TimeSeries>,
) -> Result<&'a TimeSeries, DailyError> {
    let monthly = monthly.ok_or_else(|| DailyError::MissingMonthly { id: id.to_string() })?;
    require_interval("monthly", monthly, Interval::Month)?;
    Ok(monthly)
}

fn require_daily<'a>(
    id: &str,
    daily_id: &str,
    role: &'static str,
    daily: Option<&'a TimeSeries>,
) -> Result<&'a TimeSeries, DailyError> {
    let daily = daily.ok_or_else(|| DailyError::MissingDaily {
        id: id.to_string(),
        daily_id: daily_id.to_string(),
    })?;
    require_interval(role, daily, Interval::Day)?;
    Ok(daily)
}

fn require_interval(
    role: &'static str,
    series: &TimeSeries,
    expected: Interval,
) -> Result<(), DailyError> {
    if series.interval() == expected {
        Ok(())
    } else {
        Err(DailyError::WrongInterval {
            role,
            expected,
            got: series.interval(),
        })
    }
}

/// Returns `true` when [`estimate_daily`] would produce a series for the same
/// arguments.
pub fn is_available(
    id: &str,
    daily_flag: &str,
    monthly: Option<&TimeSeries>,
    daily: Option<&TimeSeries>,
    options: &DailyOptions,
) -> bool {
    plan(id, daily_flag, monthly, daily, options).is_ok()
}

/// Estimates the daily series of `id`.
///
/// The mode comes from [`select_mode`]. `monthly` is the location's monthly
/// series; `daily` is its own daily series (direct mode) or the template
/// named by the flag (pattern mode).
///
/// Returns `None`, with a warning, when the inputs the mode needs are absent
/// or unusable.
#[tracing::instrument(skip(monthly, daily, options))]
pub fn estimate_daily(
    id: &str,
    daily_flag: &str,
    monthly: Option<&TimeSeries>,
    daily: Option<&TimeSeries>,
    options: &DailyOptions,
) -> Option<TimeSeries> {
    let result = plan(id, daily_flag, monthly, daily, options).and_then(|plan| match plan {
        Plan::Flat { monthly } => spread_monthly(id, monthly, options.output_units()),
        Plan::Direct { daily } => Ok(daily.clone()),
        Plan::Template { template } => Ok(template.clone()),
        Plan::Pattern { monthly, template } => scale_template(id, monthly, template),
    });

    match result {
        Ok(series) => {
            debug!(n_days = series.len(), "estimated daily series");
            Some(series)
        }
        Err(e) => {
            warn!(error = %e, "cannot estimate daily series");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headgate_calendar::ymd;
    use headgate_series::DataUnits;

    fn monthly(units: DataUnits) -> TimeSeries {
        TimeSeries::from_values(
            "0801001",
            Interval::Month,
            ymd(2001, 1, 1).unwrap(),
            units,
            vec![31.0, 28.0],
        )
        .unwrap()
    }

    fn daily(id: &str) -> TimeSeries {
        TimeSeries::from_values(
            id,
            Interval::Day,
            ymd(2001, 1, 1).unwrap(),
            DataUnits::Cfs,
            vec![1.0; 59],
        )
        .unwrap()
    }

    #[test]
    fn direct_returns_copy() {
        let own = daily("0801001");
        let out = estimate_daily("0801001", "0801001", None, Some(&own), &DailyOptions::new());
        assert_eq!(out, Some(own));
    }

    #[test]
    fn direct_without_daily_unavailable() {
        let m = monthly(DataUnits::Acft);
        assert!(estimate_daily("0801001", "0801001", Some(&m), None, &DailyOptions::new()).is_none());
    }

    #[test]
    fn flat_requires_volume() {
        let m = monthly(DataUnits::Cfs);
        assert!(matches!(
            plan("0801001", "0", Some(&m), None, &DailyOptions::new()),
            Err(DailyError::UnsupportedUnits { .. })
        ));
    }

    #[test]
    fn flat_requires_monthly_interval() {
        let d = daily("0801001");
        assert!(matches!(
            plan("0801001", "0", Some(&d), None, &DailyOptions::new()),
            Err(DailyError::WrongInterval { .. })
        ));
    }

    #[test]
    fn template_returned_when_not_calculating() {
        let tpl = daily("08010500");
        let options = DailyOptions::new().with_calculate(false);
        let out = estimate_daily("0801001", "08010500", None, Some(&tpl), &options);
        assert_eq!(out, Some(tpl));
    }

    #[test]
    fn pattern_needs_monthly_when_calculating() {
        let tpl = daily("08010500");
        assert!(matches!(
            plan("0801001", "08010500", None, Some(&tpl), &DailyOptions::new()),
            Err(DailyError::MissingMonthly { .. })
        ));
    }

    #[test]
    fn flow_monthly_scales_volume_template() {
        let m = TimeSeries::from_values(
            "0801001",
            Interval::Month,
            ymd(2001, 4, 1).unwrap(),
            DataUnits::Cfs,
            vec![1.0],
        )
        .unwrap();
        let tpl = TimeSeries::from_values(
            "08010500",
            Interval::Day,
            ymd(2001, 4, 1).unwrap(),
            DataUnits::Acft,
            vec![5.0; 30],
        )
        .unwrap();
        let options = DailyOptions::new();
        assert!(is_available("0801001", "08010500", Some(&m), Some(&tpl), &options));
        let out = estimate_daily("0801001", "08010500", Some(&m), Some(&tpl), &options).unwrap();
        assert_eq!(out.units(), &DataUnits::Acft);
        assert!((out.values()[0] - headgate_series::CFS_DAY_TO_ACFT).abs() < 1e-12);
    }
}
