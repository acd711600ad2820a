//! Synthesize command: build one decree series per group of rights.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, info_span};

use headgate_rights::{
    AggregationPolicy, BuildOptions, RightRecord, build_right_series, group_rights, total_series,
};
use headgate_series::TimeSeries;

use crate::cli::SynthesizeArgs;
use crate::config::HeadgateConfig;
use crate::convert;
use crate::output::write_json;

/// Id of the appended total series.
pub const TOTAL_ID: &str = "TOTAL";

/// Run the synthesis pipeline.
pub fn run(args: SynthesizeArgs) -> Result<()> {
    let _cmd = info_span!("synthesize").entered();
    let config = HeadgateConfig::load(&args.config)?;

    let records = convert::build_records(&config.rights)?;
    let options = convert::build_options(&config.synthesis)?;
    let policy = convert::parse_policy(&config.synthesis.policy)?;
    info!(n_rights = records.len(), %policy, "rights loaded");

    let mut series = synthesize(&records, policy, config.synthesis.parcel_year, &options)?;
    if args.total {
        if series.is_empty() {
            bail!("no series to total: no right matched the aggregation policy");
        }
        let total = total_series(&series, TOTAL_ID).context("failed to total series")?;
        series.push(total);
    }

    write_json(&series, args.output.as_deref())
}

/// Groups `records` and builds every group's series in parallel, keeping
/// group order.
pub fn synthesize(
    records: &[RightRecord],
    policy: AggregationPolicy,
    parcel_year: Option<i32>,
    options: &BuildOptions,
) -> Result<Vec<TimeSeries>> {
    let groups = group_rights(records, policy, parcel_year);
    info!(n_groups = groups.len(), "building series");
    groups
        .par_iter()
        .map(|group| {
            build_right_series(group, options)
                .with_context(|| format!("failed to synthesize group {:?}", group.key()))
        })
        .collect()
}
