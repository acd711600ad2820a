//! Water-right decree synthesis for headgate.
//!
//! This crate turns normalized water-right records into decree time series:
//! records are grouped by location, parcel, or right, and each group becomes
//! one series holding the sum of its rights' decrees from their effective
//! dates onward.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐     ┌──────────────┐
//!  │ RightRecord  │────▶│  group_rights  │────▶│ build_right_     │────▶│ total_series │
//!  │ + PriorityKey│     │  (policy)      │     │ series (options) │     │ (optional)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘     └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use headgate_calendar::{Interval, ymd};
//! use headgate_rights::{
//!     AggregationPolicy, BuildOptions, PriorityKey, RightKind, RightRecord, build_right_series,
//!     group_rights,
//! };
//!
//! let records = vec![RightRecord::new(
//!     RightKind::Diversion,
//!     "0801001",
//!     "0801001.01",
//!     5.0,
//!     PriorityKey::from_admin_number("30000.00000"),
//! )?];
//! let groups = group_rights(&records, AggregationPolicy::ByLocation, None);
//! let options = BuildOptions::new()
//!     .with_interval(Interval::Month)
//!     .with_output_period(ymd(1950, 1, 1)?, ymd(2000, 12, 31)?);
//! let series = build_right_series(&groups[0], &options)?;
//! ```

mod build;
mod config;
mod error;
mod group;
mod kind;
mod priority;
mod record;
mod total;

pub use build::{build_right_series, convert_decree, effective_start_date};
pub use config::{BuildOptions, FreeWaterPolicy};
pub use error::RightsError;
pub use group::{AggregationPolicy, RightGroup, group_rights};
pub use kind::{RightKind, RightKindInfo};
pub use priority::{ADMIN_EPOCH, DEFAULT_FREE_WATER_THRESHOLD, PriorityKey};
pub use record::{OnOff, Parcel, RightRecord};
pub use total::total_series;
