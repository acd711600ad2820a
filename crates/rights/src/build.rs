//! Decree time-series synthesis for one group of rights.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use headgate_calendar::{
    Interval, days_in_month, days_in_step, days_in_year, end_of_step, steps_between, truncate,
};
use headgate_series::{DataUnits, TimeSeries, acft_to_cfs, cfs_to_acft};
use tracing::debug;

use crate::config::{BuildOptions, FreeWaterPolicy};
use crate::error::RightsError;
use crate::group::RightGroup;
use crate::record::RightRecord;

/// Builds the decree time series of `group`.
///
/// Each record adds its decree, converted to the target units, to every step
/// from its effective start through the end of its on/off window. Steps
/// before any right is effective stay at zero, so the result never contains
/// missing values.
///
/// With [`Interval::Irregular`] the result is a breakpoint series: one point
/// at the period start and one wherever the active total changes.
///
/// # Errors
///
/// Returns [`RightsError::InvalidInput`] if the options are invalid or if a
/// decree cannot be converted to the target units.
#[tracing::instrument(skip(group, options), fields(key = group.key(), n_rights = group.len()))]
pub fn build_right_series(
    group: &RightGroup<'_>,
    options: &BuildOptions,
) -> Result<TimeSeries, RightsError> {
    options.validate()?;
    let (start, end) = period(group, options);
    let interval = options.interval();

    if interval == Interval::Irregular {
        return build_breakpoints(group, options, start, end);
    }

    let (first, last) = (truncate(start, interval), truncate(end, interval));
    let period_end = end_of_step(last, interval);
    let mut series = TimeSeries::regular(
        group.key(),
        interval,
        first,
        last,
        options.target_units().clone(),
        0.0,
    )?;
    let n_steps = series.len();

    for record in group.records() {
        let effective = effective_start_date(record, group, options);
        let Some((from, to)) = record.active_period(effective, period_end) else {
            debug!(right = record.right_id(), "right contributes nothing in period");
            continue;
        };

        let i0 = steps_between(first, from, interval)?.max(0);
        let i1 = steps_between(first, to, interval)?;
        let Ok(i0) = usize::try_from(i0) else { continue };
        let Ok(i1) = usize::try_from(i1) else { continue };
        let i1 = i1.min(n_steps.saturating_sub(1));

        debug!(
            right = record.right_id(),
            %effective,
            %from,
            %to,
            "adding decree"
        );
        for idx in i0..=i1 {
            let date = series.dates()[idx];
            let amount = convert_decree(record, options.target_units(), date, interval)?;
            series.add_at(idx, amount);
        }
    }

    Ok(series)
}

/// Date from which `record` contributes to its group's series, before the
/// on/off schedule is applied.
///
/// Rights below the free-water threshold use their appropriation date. Free
/// water follows the configured [`FreeWaterPolicy`].
pub fn effective_start_date(
    record: &RightRecord,
    group: &RightGroup<'_>,
    options: &BuildOptions,
) -> NaiveDate {
    let own = record.priority().appropriation_date();
    let threshold = options.free_water_threshold();
    if !record.priority().is_free_water(threshold) {
        return own;
    }

    let period_start = match options.output_period() {
        Some((start, _)) => start,
        None => dated_range(group, threshold).map_or(group.min_date(), |(s, _)| s),
    };
    let period_start = truncate(period_start, options.interval());

    match options.free_water_policy() {
        FreeWaterPolicy::None => own,
        FreeWaterPolicy::AlwaysOn => group.min_date().min(period_start),
        FreeWaterPolicy::UseSeniorRightDate => group
            .records()
            .iter()
            .filter(|r| !r.priority().is_free_water(threshold))
            .min_by(|a, b| a.priority().cmp(b.priority()))
            .map(|senior| senior.priority().appropriation_date())
            .or(options.fallback_date())
            .unwrap_or(period_start),
    }
}

/// Converts the decree of `record` into `target` units for the step at `date`.
///
/// Decrees already in the target's dimension pass through unchanged, so a
/// volume decree is treated as the amount for one step of `interval`.
///
/// # Errors
///
/// Returns [`RightsError::InvalidInput`] when either side has units that are
/// neither flow nor volume and the two differ.
pub fn convert_decree(
    record: &RightRecord,
    target: &DataUnits,
    date: NaiveDate,
    interval: Interval,
) -> Result<f64, RightsError> {
    let decree = record.decree().max(0.0);
    let source = record.decree_units();

    if same_dimension(source, target) {
        return Ok(decree);
    }

    if source.is_volume() && target.is_flow() {
        let days = match interval {
            Interval::Year => f64::from(days_in_year(date.year())) / 12.0,
            _ => f64::from(days_in_month(date.year(), date.month())?),
        };
        return Ok(acft_to_cfs(decree, days));
    }

    if source.is_flow() && target.is_volume() {
        return Ok(cfs_to_acft(decree, f64::from(days_in_step(date, interval))));
    }

    Err(RightsError::InvalidInput {
        reason: format!(
            "cannot convert decree of right {:?} from {source} to {target}",
            record.right_id()
        ),
    })
}

fn same_dimension(a: &DataUnits, b: &DataUnits) -> bool {
    a == b || (a.is_flow() && b.is_flow()) || (a.is_volume() && b.is_volume())
}

/// Requested or derived output period, untruncated.
///
/// Without an output period the span of the non-free-water rights is used,
/// and the whole group's span when every right is free water.
fn period(group: &RightGroup<'_>, options: &BuildOptions) -> (NaiveDate, NaiveDate) {
    options
        .output_period()
        .or_else(|| dated_range(group, options.free_water_threshold()))
        .unwrap_or((group.min_date(), group.max_date()))
}

/// Earliest and latest appropriation dates among rights that are not free
/// water.
fn dated_range(group: &RightGroup<'_>, threshold: f64) -> Option<(NaiveDate, NaiveDate)> {
    group
        .records()
        .iter()
        .filter(|r| !r.priority().is_free_water(threshold))
        .map(|r| r.priority().appropriation_date())
        .fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
        })
}

fn build_breakpoints(
    group: &RightGroup<'_>,
    options: &BuildOptions,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TimeSeries, RightsError> {
    let target = options.target_units();
    let mut deltas: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    deltas.insert(start, 0.0);

    for record in group.records() {
        let units = record.decree_units();
        if !same_dimension(units, target) {
            return Err(RightsError::UnitsMismatch {
                expected: target.to_string(),
                got: units.to_string(),
            });
        }

        let effective = effective_start_date(record, group, options);
        let Some((from, to)) = record.active_period(effective, end) else {
            continue;
        };
        let decree = record.decree().max(0.0);
        *deltas.entry(from.max(start)).or_insert(0.0) += decree;
        if to < end
            && let Some(off) = to.succ_opt()
        {
            *deltas.entry(off).or_insert(0.0) -= decree;
        }
    }

    let mut total = 0.0;
    let mut points: Vec<(NaiveDate, f64)> = Vec::with_capacity(deltas.len());
    for (date, delta) in deltas {
        total += delta;
        match points.last() {
            Some(&(_, previous)) if previous == total => {}
            _ => points.push((date, total)),
        }
    }
    debug!(n_points = points.len(), "built breakpoint series");

    Ok(TimeSeries::irregular(group.key(), target.clone(), points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{AggregationPolicy, group_rights};
    use crate::kind::RightKind;
    use crate::priority::{ADMIN_EPOCH, PriorityKey};
    use crate::record::OnOff;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Administration number whose appropriation date is `date`.
    fn admin_for(date: NaiveDate) -> PriorityKey {
        PriorityKey::from_value((date - ADMIN_EPOCH).num_days() as f64)
    }

    fn right(id: &str, decree: f64, date: NaiveDate) -> RightRecord {
        RightRecord::new(RightKind::Diversion, "loc", id, decree, admin_for(date)).unwrap()
    }

    #[test]
    fn zero_before_first_right() {
        let records = vec![right("a", 2.0, d(2000, 3, 15))];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_output_period(d(2000, 1, 1), d(2000, 6, 30));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_eq!(ts.values(), &[0.0, 0.0, 2.0, 2.0, 2.0, 2.0]);
        assert_eq!(ts.id(), "loc");
    }

    #[test]
    fn default_period_spans_group_dates() {
        let records = vec![
            right("a", 1.0, d(2000, 3, 15)),
            right("b", 1.0, d(2001, 2, 1)),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let ts = build_right_series(&groups[0], &BuildOptions::new()).unwrap();
        assert_eq!(ts.date1(), d(2000, 3, 1));
        assert_eq!(ts.date2(), d(2001, 2, 1));
        assert_eq!(ts.len(), 12);
        assert_eq!(ts.values()[0], 1.0);
        assert_eq!(ts.values()[11], 2.0);
    }

    #[test]
    fn never_switch_skipped() {
        let records = vec![right("a", 2.0, d(1990, 1, 1)).with_on_off(OnOff::Never)];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_output_period(d(2000, 1, 1), d(2000, 3, 31));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert!(ts.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn negative_decree_clamped() {
        let records = vec![right("a", -4.0, d(1990, 1, 1))];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_output_period(d(2000, 1, 1), d(2000, 2, 28));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_eq!(ts.values(), &[0.0, 0.0]);
    }

    #[test]
    fn volume_decree_to_flow() {
        let records = vec![
            right("a", 59.505, d(1990, 1, 1)).with_units(DataUnits::AcftPerMonth),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_output_period(d(2001, 4, 1), d(2001, 4, 30));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_relative_eq!(ts.values()[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn flow_decree_to_volume() {
        let records = vec![right("a", 1.0, d(1990, 1, 1))];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_output_period(d(2001, 1, 1), d(2001, 2, 28))
            .with_target_units(DataUnits::Acft);
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_relative_eq!(ts.values()[0], 1.9835 * 31.0, epsilon = 1e-12);
        assert_relative_eq!(ts.values()[1], 1.9835 * 28.0, epsilon = 1e-12);
    }

    #[test]
    fn yearly_volume_to_flow_uses_average_month() {
        let records = vec![right("a", 100.0, d(1990, 1, 1)).with_units(DataUnits::Acft)];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_interval(Interval::Year)
            .with_output_period(d(2000, 1, 1), d(2001, 12, 31));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_relative_eq!(ts.values()[0], 100.0 / (1.9835 * 366.0 / 12.0), epsilon = 1e-12);
        assert_relative_eq!(ts.values()[1], 100.0 / (1.9835 * 365.0 / 12.0), epsilon = 1e-12);
    }

    #[test]
    fn volume_decree_is_per_step_amount() {
        let records = vec![right("a", 10.0, d(1990, 1, 1)).with_units(DataUnits::AcftPerMonth)];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_interval(Interval::Day)
            .with_output_period(d(2000, 1, 1), d(2000, 1, 3))
            .with_target_units(DataUnits::Acft);
        let ts = build_right_series(&groups[0], &opts).unwrap();
        assert_eq!(ts.values(), &[10.0, 10.0, 10.0]);
        assert_eq!(
            convert_decree(&records[0], &DataUnits::Acft, d(2000, 2, 1), Interval::Month).unwrap(),
            10.0
        );
    }

    #[test]
    fn other_units_rejected() {
        let records = vec![
            right("a", 1.0, d(1990, 1, 1)).with_units(DataUnits::Other("GPM".to_string())),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_output_period(d(2000, 1, 1), d(2000, 1, 31));
        assert!(matches!(
            build_right_series(&groups[0], &opts),
            Err(RightsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn only_free_water_spans_own_date() {
        let records = vec![
            RightRecord::new(
                RightKind::Diversion,
                "loc",
                "fw",
                1.0,
                PriorityKey::from_value(99999.0),
            )
            .unwrap(),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new().with_free_water(90000.0, FreeWaterPolicy::AlwaysOn);
        let ts = build_right_series(&groups[0], &opts).unwrap();
        let date = records[0].priority().appropriation_date();
        assert_eq!(ts.len(), 1);
        assert_eq!(ts.date1(), truncate(date, Interval::Month));
        assert_eq!(ts.values(), &[1.0]);
    }

    #[test]
    fn senior_right_date_policy() {
        let records = vec![
            right("junior", 1.0, d(1980, 1, 1)),
            right("senior", 1.0, d(1920, 6, 1)),
            RightRecord::new(
                RightKind::Diversion,
                "loc",
                "fw",
                1.0,
                PriorityKey::from_value(99999.0),
            )
            .unwrap(),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_output_period(d(1900, 1, 1), d(2000, 12, 31))
            .with_free_water(90000.0, FreeWaterPolicy::UseSeniorRightDate);
        let fw = groups[0].records()[2];
        assert_eq!(effective_start_date(fw, &groups[0], &opts), d(1920, 6, 1));
    }

    #[test]
    fn senior_right_date_falls_back() {
        let records = vec![
            RightRecord::new(
                RightKind::Diversion,
                "loc",
                "fw",
                1.0,
                PriorityKey::from_value(99999.0),
            )
            .unwrap(),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let base = BuildOptions::new()
            .with_output_period(d(1950, 3, 10), d(2000, 12, 31))
            .with_free_water(90000.0, FreeWaterPolicy::UseSeniorRightDate);
        let fw = groups[0].records()[0];
        assert_eq!(effective_start_date(fw, &groups[0], &base), d(1950, 3, 1));
        let with_fallback = base.with_fallback_date(d(1930, 1, 1));
        assert_eq!(
            effective_start_date(fw, &groups[0], &with_fallback),
            d(1930, 1, 1)
        );
    }

    #[test]
    fn free_water_policy_none_keeps_own_date() {
        let records = vec![
            RightRecord::new(
                RightKind::Diversion,
                "loc",
                "fw",
                1.0,
                PriorityKey::from_value(99999.0),
            )
            .unwrap(),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_output_period(d(1950, 1, 1), d(2000, 12, 31))
            .with_free_water(90000.0, FreeWaterPolicy::None);
        let ts = build_right_series(&groups[0], &opts).unwrap();
        // 99999 days after the epoch is in 2123, after the period.
        assert!(ts.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn breakpoints_mark_changes() {
        let records = vec![
            right("a", 2.0, d(1950, 5, 10)),
            right("b", 3.0, d(1960, 1, 1)).with_on_off(OnOff::OffAfter(1970)),
            right("c", 1.0, d(1960, 1, 1)),
        ];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_interval(Interval::Irregular)
            .with_output_period(d(1940, 1, 1), d(2000, 12, 31));
        let ts = build_right_series(&groups[0], &opts).unwrap();
        let points: Vec<_> = ts.iter().collect();
        assert_eq!(
            points,
            vec![
                (d(1940, 1, 1), 0.0),
                (d(1950, 5, 10), 2.0),
                (d(1960, 1, 1), 6.0),
                (d(1971, 1, 1), 3.0),
            ]
        );
    }

    #[test]
    fn breakpoints_reject_mixed_units() {
        let records = vec![right("a", 2.0, d(1950, 5, 10)).with_units(DataUnits::Acft)];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let opts = BuildOptions::new()
            .with_interval(Interval::Irregular)
            .with_output_period(d(1940, 1, 1), d(2000, 12, 31));
        assert!(matches!(
            build_right_series(&groups[0], &opts),
            Err(RightsError::UnitsMismatch { .. })
        ));
    }
}
