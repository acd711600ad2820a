//! Grouping of right records by spatial-aggregation policy.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::RightsError;
use crate::kind::RightKind;
use crate::record::RightRecord;

/// How right records are combined into one synthesized series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationPolicy {
    /// One group per location id.
    ByLocation,
    /// One group per parcel id; records without a parcel are skipped.
    ByParcel,
    /// One group per individual right.
    ByRight,
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AggregationPolicy::ByLocation => "location",
            AggregationPolicy::ByParcel => "parcel",
            AggregationPolicy::ByRight => "right",
        })
    }
}

impl FromStr for AggregationPolicy {
    type Err = RightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "location" | "by_location" => Ok(AggregationPolicy::ByLocation),
            "parcel" | "by_parcel" => Ok(AggregationPolicy::ByParcel),
            "right" | "by_right" => Ok(AggregationPolicy::ByRight),
            other => Err(RightsError::InvalidInput {
                reason: format!("unknown aggregation policy: {other:?}"),
            }),
        }
    }
}

/// Non-empty set of records that synthesize into one series.
#[derive(Debug, Clone)]
pub struct RightGroup<'a> {
    key: String,
    records: Vec<&'a RightRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl<'a> RightGroup<'a> {
    fn new(key: String, first: &'a RightRecord) -> Self {
        let date = first.priority().appropriation_date();
        Self {
            key,
            records: vec![first],
            min_date: date,
            max_date: date,
        }
    }

    fn push(&mut self, record: &'a RightRecord) {
        let date = record.priority().appropriation_date();
        self.min_date = self.min_date.min(date);
        self.max_date = self.max_date.max(date);
        self.records.push(record);
    }

    /// Group key (location id, parcel id, or `location-right`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Member records in first-seen order.
    pub fn records(&self) -> &[&'a RightRecord] {
        &self.records
    }

    /// Number of member records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; groups are built from at least one record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest appropriation date among members.
    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Latest appropriation date among members.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }
}

/// Groups `records` under `policy`, keeping first-seen order.
///
/// When `parcel_year` is given, well records whose parcel year differs (or
/// that carry no parcel) are dropped; other kinds are unaffected. Empty input
/// yields an empty list.
#[tracing::instrument(skip(records), fields(n_records = records.len()))]
pub fn group_rights(
    records: &[RightRecord],
    policy: AggregationPolicy,
    parcel_year: Option<i32>,
) -> Vec<RightGroup<'_>> {
    let mut groups: Vec<RightGroup<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if let Some(year) = parcel_year
            && record.kind() == RightKind::Well
            && record.parcel().map(|p| p.year) != Some(year)
        {
            debug!(right = record.right_id(), year, "skipping well outside parcel year");
            continue;
        }

        let key = match policy {
            AggregationPolicy::ByLocation => record.location_id().to_string(),
            AggregationPolicy::ByParcel => match record.parcel() {
                Some(parcel) => parcel.id.clone(),
                None => continue,
            },
            AggregationPolicy::ByRight => {
                format!("{}-{}", record.location_id(), record.right_id())
            }
        };

        let existing = index
            .get(&key)
            .copied()
            .filter(|_| policy != AggregationPolicy::ByRight);
        match existing {
            Some(i) => groups[i].push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RightGroup::new(key, record));
            }
        }
    }

    debug!(n_groups = groups.len(), %policy, "grouped rights");
    groups
}
