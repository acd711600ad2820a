//! Compare command: average annual difference between a location's decree
//! series and a supplied series.

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::{info, info_span};

use headgate_compare::average_difference;
use headgate_rights::{AggregationPolicy, build_right_series, group_rights};

use crate::cli::CompareArgs;
use crate::config::HeadgateConfig;
use crate::convert;
use crate::output::write_json;

#[derive(Debug, Serialize)]
struct Comparison<'a> {
    id: &'a str,
    against: &'a str,
    percent: bool,
    difference: f64,
}

/// Run the comparison.
///
/// The decree series is synthesized in the units of the supplied series so
/// annual totals are comparable.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare", id = %args.id, against = %args.against).entered();
    let config = HeadgateConfig::load(&args.config)?;

    let supplied = config
        .series
        .iter()
        .find(|s| s.id == args.against)
        .ok_or_else(|| anyhow!("no series with id {:?} in config", args.against))?;
    let observed = convert::build_series(supplied)?;

    let records = convert::build_records(&config.rights)?;
    let options = convert::build_options(&config.synthesis)?
        .with_target_units(observed.units().clone());
    let groups = group_rights(
        &records,
        AggregationPolicy::ByLocation,
        config.synthesis.parcel_year,
    );
    let Some(group) = groups.iter().find(|g| g.key() == args.id) else {
        bail!("no rights at location {:?}", args.id);
    };
    let decree = build_right_series(group, &options)
        .with_context(|| format!("failed to synthesize series for {:?}", args.id))?;

    let difference = average_difference(&decree, &observed, args.percent).ok_or_else(|| {
        anyhow!(
            "unable to compare {:?} with {:?}: no complete year in common",
            args.id,
            args.against
        )
    })?;
    info!(difference, "comparison complete");

    write_json(
        &Comparison {
            id: &args.id,
            against: &args.against,
            percent: args.percent,
            difference,
        },
        None,
    )
}
