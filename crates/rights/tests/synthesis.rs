use approx::assert_relative_eq;
use headgate_calendar::{Datelike, Interval, NaiveDate, truncate, ymd};
use headgate_rights::{
    ADMIN_EPOCH, AggregationPolicy, BuildOptions, FreeWaterPolicy, OnOff, PriorityKey, RightKind,
    RightRecord, build_right_series, effective_start_date, group_rights, total_series,
};
use headgate_series::{DataUnits, TimeSeries};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    ymd(y, m, day).unwrap()
}

fn admin_for(date: NaiveDate) -> PriorityKey {
    PriorityKey::from_value((date - ADMIN_EPOCH).num_days() as f64)
}

fn diversion(id: &str, decree: f64, priority: PriorityKey) -> RightRecord {
    RightRecord::new(RightKind::Diversion, "0801001", id, decree, priority).unwrap()
}

#[test]
fn senior_and_junior_rights_stack() {
    let records = vec![
        diversion("senior", 5.0, PriorityKey::from_admin_number("100000.00000")),
        diversion("junior", 3.0, PriorityKey::from_admin_number("200000.00000")),
    ];
    let junior_date = records[1].priority().appropriation_date();
    let start = d(junior_date.year(), 1, 1);
    let end = d(junior_date.year() + 1, 12, 31);

    let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
    assert_eq!(groups.len(), 1);
    let options = BuildOptions::new()
        .with_interval(Interval::Month)
        .with_output_period(start, end);
    let ts = build_right_series(&groups[0], &options).unwrap();

    assert_eq!(ts.len(), 24);
    let junior_month = truncate(junior_date, Interval::Month);
    for (date, value) in ts.iter() {
        let expected = if date < junior_month { 5.0 } else { 8.0 };
        assert_eq!(value, expected, "{date}");
    }
}

#[test]
fn off_after_year_drops_out_in_january() {
    let records = vec![
        diversion("base", 1.0, admin_for(d(1990, 1, 1))),
        diversion("limited", 4.0, admin_for(d(2000, 1, 1))).with_on_off(OnOff::from_switch(-2005)),
    ];
    let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
    let options = BuildOptions::new().with_output_period(d(2000, 1, 1), d(2010, 12, 31));
    let ts = build_right_series(&groups[0], &options).unwrap();

    assert_eq!(ts.len(), 132);
    for (date, value) in ts.iter() {
        let expected = if date < d(2006, 1, 1) { 5.0 } else { 1.0 };
        assert_eq!(value, expected, "{date}");
    }
}

#[test]
fn group_series_is_sum_of_single_rights() {
    let records = vec![
        diversion("a", 2.5, admin_for(d(1955, 7, 4))),
        diversion("b", 1.0, admin_for(d(1949, 1, 1))).with_on_off(OnOff::OnFrom(1960)),
        diversion("c", 0.75, admin_for(d(1952, 2, 29))).with_on_off(OnOff::OffAfter(1958)),
        diversion("d", 120.0, admin_for(d(1951, 3, 1))).with_units(DataUnits::AcftPerMonth),
        diversion("e", 9.0, admin_for(d(1951, 3, 1))).with_on_off(OnOff::Never),
    ];
    let options = BuildOptions::new().with_output_period(d(1950, 1, 1), d(1965, 12, 31));

    let by_location = group_rights(&records, AggregationPolicy::ByLocation, None);
    let combined = build_right_series(&by_location[0], &options).unwrap();

    let singles: Vec<TimeSeries> = group_rights(&records, AggregationPolicy::ByRight, None)
        .iter()
        .map(|g| build_right_series(g, &options).unwrap())
        .collect();
    assert_eq!(singles.len(), records.len());

    for (idx, &value) in combined.values().iter().enumerate() {
        let sum: f64 = singles.iter().map(|s| s.values()[idx]).sum();
        assert_relative_eq!(value, sum, epsilon = 1e-9);
    }
}

#[test]
fn always_on_free_water_never_starts_late() {
    let threshold = 90_000.0;
    let free = diversion("free", 1.0, PriorityKey::from_value(99_999.0));
    let cases = [
        (d(1920, 5, 1), d(1900, 1, 1)),
        (d(1920, 5, 1), d(1950, 1, 1)),
        (d(1980, 1, 1), d(1980, 1, 1)),
    ];
    for (senior_date, period_start) in cases {
        let records = vec![diversion("dated", 1.0, admin_for(senior_date)), free.clone()];
        let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
        let options = BuildOptions::new()
            .with_output_period(period_start, d(2000, 12, 31))
            .with_free_water(threshold, FreeWaterPolicy::AlwaysOn);

        let group = &groups[0];
        let effective = effective_start_date(group.records()[1], group, &options);
        assert!(effective <= group.min_date().min(period_start));

        // The free-water right contributes from the first step.
        let ts = build_right_series(group, &options).unwrap();
        assert!(ts.values()[0] >= 1.0);
    }
}

#[test]
fn by_right_without_period_builds_free_water_rights() {
    let records = vec![
        diversion("dated", 2.0, admin_for(d(1950, 3, 15))),
        diversion("free", 1.0, PriorityKey::from_value(99_999.0)),
    ];
    let options = BuildOptions::new().with_free_water(90_000.0, FreeWaterPolicy::AlwaysOn);
    let series: Vec<TimeSeries> = group_rights(&records, AggregationPolicy::ByRight, None)
        .iter()
        .map(|g| build_right_series(g, &options))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date1(), d(1950, 3, 1));
    assert_eq!(series[0].values(), &[2.0]);
    let free_date = records[1].priority().appropriation_date();
    assert_eq!(series[1].date1(), truncate(free_date, Interval::Month));
    assert_eq!(series[1].values(), &[1.0]);
}

#[test]
fn totaling_is_idempotent_after_extension() {
    let short = TimeSeries::from_values(
        "short",
        Interval::Month,
        d(2000, 1, 1),
        DataUnits::Cfs,
        vec![1.0, 2.0, 3.0],
    )
    .unwrap();
    let alone = total_series(std::slice::from_ref(&short), "short").unwrap();
    assert_eq!(alone.values(), short.values());
    assert_eq!(alone.date1(), short.date1());
    assert_eq!(alone.date2(), short.date2());

    let window =
        TimeSeries::regular("w", Interval::Month, d(2000, 1, 1), d(2000, 6, 1), DataUnits::Cfs, 0.0)
            .unwrap();
    let extended = total_series(&[short, window], "total").unwrap();
    assert_eq!(extended.values(), &[1.0, 2.0, 3.0, 3.0, 3.0, 3.0]);

    let again = total_series(std::slice::from_ref(&extended), "total").unwrap();
    assert_eq!(again, extended);
}
