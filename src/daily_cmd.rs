//! Daily command: estimate a daily series for one location.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use headgate_calendar::Interval;
use headgate_daily::{DailyMode, DailyOptions, estimate_daily, select_mode};
use headgate_rights::{AggregationPolicy, build_right_series, group_rights};
use headgate_series::{DataUnits, TimeSeries};

use crate::cli::DailyArgs;
use crate::config::HeadgateConfig;
use crate::convert;
use crate::output::write_json;

/// Run daily estimation for `args.id`.
///
/// The monthly input is the location's decree series in acre-feet per
/// month; the daily input is looked up among the configured series by the
/// id the daily flag names.
pub fn run(args: DailyArgs) -> Result<()> {
    let _cmd = info_span!("daily", id = %args.id).entered();
    let config = HeadgateConfig::load(&args.config)?;

    let records = convert::build_records(&config.rights)?;
    let options = convert::build_options(&config.synthesis)?
        .with_interval(Interval::Month)
        .with_target_units(DataUnits::AcftPerMonth);
    let groups = group_rights(
        &records,
        AggregationPolicy::ByLocation,
        config.synthesis.parcel_year,
    );
    let monthly = groups
        .iter()
        .find(|g| g.key() == args.id)
        .map(|g| build_right_series(g, &options))
        .transpose()
        .with_context(|| format!("failed to synthesize monthly series for {:?}", args.id))?;

    let supplied = config
        .series
        .iter()
        .map(convert::build_series)
        .collect::<Result<Vec<TimeSeries>>>()?;

    let mode = select_mode(&args.id, &args.daily_flag);
    info!(%mode, has_monthly = monthly.is_some(), "selected daily mode");
    let daily_id = match &mode {
        DailyMode::Flat => None,
        DailyMode::Direct => Some(args.id.as_str()),
        DailyMode::Pattern { template_id } => Some(template_id.as_str()),
    };
    let daily = daily_id.and_then(|id| supplied.iter().find(|s| s.id() == id));

    let daily_options = DailyOptions::new()
        .with_output_units(DataUnits::parse(&config.synthesis.units))
        .with_calculate(!args.template_only);
    let estimate = estimate_daily(
        &args.id,
        &args.daily_flag,
        monthly.as_ref(),
        daily,
        &daily_options,
    )
    .ok_or_else(|| {
        anyhow!(
            "cannot estimate a daily series for {:?} with daily flag {:?}",
            args.id,
            args.daily_flag
        )
    })?;
    info!(n_days = estimate.len(), "daily series estimated");

    write_json(&estimate, args.output.as_deref())
}
