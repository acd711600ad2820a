//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use headgate_calendar::Interval;
use headgate_rights::{
    AggregationPolicy, BuildOptions, FreeWaterPolicy, OnOff, PriorityKey, RightKind, RightRecord,
};
use headgate_series::{DataUnits, TimeSeries};

use crate::config::{RightToml, SeriesToml, SynthesisToml};

/// Parses an interval name into the corresponding enum variant.
pub fn parse_interval(s: &str) -> Result<Interval> {
    s.parse::<Interval>()
        .with_context(|| format!("unknown interval: {s:?}"))
}

/// Parses an aggregation policy name.
pub fn parse_policy(s: &str) -> Result<AggregationPolicy> {
    s.parse::<AggregationPolicy>()
        .with_context(|| format!("unknown aggregation policy: {s:?}"))
}

/// Parses a free-water policy name.
pub fn parse_free_water_policy(s: &str) -> Result<FreeWaterPolicy> {
    s.parse::<FreeWaterPolicy>()
        .with_context(|| format!("unknown free-water policy: {s:?}"))
}

/// Parses a right kind by name or right-file extension.
pub fn parse_right_kind(s: &str) -> Result<RightKind> {
    match s.to_lowercase().as_str() {
        "diversion" => Ok(RightKind::Diversion),
        "instream" | "instream_flow" => Ok(RightKind::Instream),
        "reservoir" => Ok(RightKind::Reservoir),
        "well" => Ok(RightKind::Well),
        "operational" => Ok(RightKind::Operational),
        other => match RightKind::from_extension(other) {
            Some(kind) => Ok(kind),
            None => bail!("unknown right kind: {other:?}"),
        },
    }
}

/// Builds [`BuildOptions`] from the TOML synthesis section.
///
/// Both period bounds must be given together.
pub fn build_options(synthesis: &SynthesisToml) -> Result<BuildOptions> {
    let interval = parse_interval(&synthesis.interval)?;
    let policy = parse_free_water_policy(&synthesis.free_water_policy)?;
    let mut options = BuildOptions::new()
        .with_interval(interval)
        .with_free_water(synthesis.free_water_threshold, policy)
        .with_target_units(DataUnits::parse(&synthesis.units));
    match (synthesis.period_start, synthesis.period_end) {
        (Some(start), Some(end)) => options = options.with_output_period(start, end),
        (None, None) => {}
        _ => bail!("period_start and period_end must be set together"),
    }
    if let Some(date) = synthesis.fallback_date {
        options = options.with_fallback_date(date);
    }
    options.validate().context("invalid synthesis options")?;
    Ok(options)
}

/// Builds one [`RightRecord`] from its TOML entry.
pub fn build_record(right: &RightToml) -> Result<RightRecord> {
    let kind = parse_right_kind(&right.kind)?;
    let mut record = RightRecord::new(
        kind,
        &right.location,
        &right.id,
        right.decree,
        PriorityKey::from_admin_number(&right.admin),
    )
    .with_context(|| format!("invalid right {:?}", right.id))?
    .with_on_off(OnOff::from_switch(right.on_off));
    if let Some(ref units) = right.units {
        record = record.with_units(DataUnits::parse(units));
    }
    match (&right.parcel_id, right.parcel_year) {
        (Some(id), Some(year)) => {
            record = record
                .with_parcel(id, year)
                .with_context(|| format!("invalid parcel for right {:?}", right.id))?;
        }
        (None, None) => {}
        _ => bail!(
            "right {:?}: parcel_id and parcel_year must be set together",
            right.id
        ),
    }
    Ok(record)
}

/// Builds all records, keeping configuration order.
pub fn build_records(rights: &[RightToml]) -> Result<Vec<RightRecord>> {
    rights.iter().map(build_record).collect()
}

/// Builds a regular [`TimeSeries`] from an inline series entry.
pub fn build_series(series: &SeriesToml) -> Result<TimeSeries> {
    let interval = parse_interval(&series.interval)?;
    if !interval.is_regular() {
        bail!("series {:?}: inline series must be regular", series.id);
    }
    let mut ts = TimeSeries::from_values(
        &series.id,
        interval,
        series.start,
        DataUnits::parse(&series.units),
        series.values.clone(),
    )
    .with_context(|| format!("invalid series {:?}", series.id))?;
    if let Some(missing) = series.missing {
        ts = ts.with_missing(missing);
    }
    Ok(ts)
}
