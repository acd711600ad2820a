//! Normalized water-right records.

use chrono::NaiveDate;
use headgate_series::DataUnits;

use crate::error::RightsError;
use crate::kind::RightKind;
use crate::priority::PriorityKey;

/// On/off schedule of a right, decoded from the integer switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOff {
    /// `0`: never on.
    Never,
    /// `1`: on for the whole requested period.
    Always,
    /// `y > 1`: on starting January 1 of year `y`.
    OnFrom(i32),
    /// `y < 0`: on from the period start through December 31 of `|y|`.
    OffAfter(i32),
}

impl OnOff {
    /// Decodes an integer on/off switch.
    pub fn from_switch(switch: i32) -> Self {
        match switch {
            0 => OnOff::Never,
            1 => OnOff::Always,
            y if y > 1 => OnOff::OnFrom(y),
            y => OnOff::OffAfter(y.saturating_abs()),
        }
    }

    /// Encodes back to the integer switch.
    pub fn switch(self) -> i32 {
        match self {
            OnOff::Never => 0,
            OnOff::Always => 1,
            OnOff::OnFrom(y) => y,
            OnOff::OffAfter(y) => -y,
        }
    }
}

/// Groundwater parcel a well right irrigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parcel {
    /// Parcel identifier.
    pub id: String,
    /// Year of the parcel data set.
    pub year: i32,
}

/// One water right, normalized for synthesis. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RightRecord {
    kind: RightKind,
    location_id: String,
    right_id: String,
    decree: f64,
    decree_units: DataUnits,
    on_off: OnOff,
    priority: PriorityKey,
    parcel: Option<Parcel>,
}

impl RightRecord {
    /// Creates a record that is always on, with the kind's default units.
    ///
    /// # Errors
    ///
    /// Returns [`RightsError::InvalidInput`] if either id is empty.
    pub fn new(
        kind: RightKind,
        location_id: impl Into<String>,
        right_id: impl Into<String>,
        decree: f64,
        priority: PriorityKey,
    ) -> Result<Self, RightsError> {
        let location_id = location_id.into();
        let right_id = right_id.into();
        if location_id.trim().is_empty() {
            return Err(RightsError::InvalidInput {
                reason: format!("right {right_id:?} has an empty location id"),
            });
        }
        if right_id.trim().is_empty() {
            return Err(RightsError::InvalidInput {
                reason: format!("a right at {location_id:?} has an empty right id"),
            });
        }
        if !decree.is_finite() {
            return Err(RightsError::InvalidInput {
                reason: format!("right {right_id:?} has a non-finite decree"),
            });
        }
        Ok(Self {
            kind,
            location_id,
            right_id,
            decree,
            decree_units: kind.info().default_units.clone(),
            on_off: OnOff::Always,
            priority,
            parcel: None,
        })
    }

    /// Sets the on/off schedule.
    pub fn with_on_off(mut self, on_off: OnOff) -> Self {
        self.on_off = on_off;
        self
    }

    /// Sets the decree units.
    pub fn with_units(mut self, units: DataUnits) -> Self {
        self.decree_units = units;
        self
    }

    /// Attaches a parcel.
    ///
    /// # Errors
    ///
    /// Returns [`RightsError::InvalidInput`] if the right kind has no parcels
    /// or the parcel id is empty.
    pub fn with_parcel(mut self, id: impl Into<String>, year: i32) -> Result<Self, RightsError> {
        let id = id.into();
        if !self.kind.info().has_parcels {
            return Err(RightsError::InvalidInput {
                reason: format!(
                    "{} right {:?} cannot carry a parcel",
                    self.kind.info().name,
                    self.right_id
                ),
            });
        }
        if id.trim().is_empty() {
            return Err(RightsError::InvalidInput {
                reason: format!("right {:?} has an empty parcel id", self.right_id),
            });
        }
        self.parcel = Some(Parcel { id, year });
        Ok(self)
    }

    /// Right kind.
    pub fn kind(&self) -> RightKind {
        self.kind
    }

    /// Location (node) at which the right is exercised.
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// Right identifier.
    pub fn right_id(&self) -> &str {
        &self.right_id
    }

    /// Decreed amount.
    pub fn decree(&self) -> f64 {
        self.decree
    }

    /// Units of the decree.
    pub fn decree_units(&self) -> &DataUnits {
        &self.decree_units
    }

    /// On/off schedule.
    pub fn on_off(&self) -> OnOff {
        self.on_off
    }

    /// Seniority key.
    pub fn priority(&self) -> &PriorityKey {
        &self.priority
    }

    /// Parcel, for well rights that carry one.
    pub fn parcel(&self) -> Option<&Parcel> {
        self.parcel.as_ref()
    }

    /// Days on which the right is switched on, starting no earlier than
    /// `start` and ending no later than `end`.
    ///
    /// Returns `None` for a right that is never on or whose schedule leaves
    /// no day inside `[start, end]`.
    pub fn active_period(&self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let (from, to) = match self.on_off {
            OnOff::Never => return None,
            OnOff::Always => (start, end),
            OnOff::OnFrom(year) => {
                let on = NaiveDate::from_ymd_opt(year, 1, 1)?;
                (start.max(on), end)
            }
            OnOff::OffAfter(year) => {
                let off = NaiveDate::from_ymd_opt(year, 12, 31)?;
                (start, end.min(off))
            }
        };
        (from <= to).then_some((from, to))
    }
}
