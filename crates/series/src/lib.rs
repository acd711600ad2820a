//! Date-indexed series container for headgate.
//!
//! A [`TimeSeries`] carries an interval, a period, units, a missing-value
//! sentinel, and one value per step. Right synthesis, daily estimation, and
//! period differencing all read and produce this type.
//!
//! ```ignore
//! use headgate_series::{DataUnits, TimeSeries};
//! use headgate_calendar::{Interval, ymd};
//!
//! let ts = TimeSeries::regular("08_ABC", Interval::Month, ymd(2000, 1, 1)?, ymd(2000, 12, 1)?,
//!     DataUnits::Cfs, 0.0)?;
//! assert_eq!(ts.len(), 12);
//! ```

mod error;
mod series;
mod units;

pub use error::SeriesError;
pub use series::{DEFAULT_MISSING, TimeSeries};
pub use units::{CFS_DAY_TO_ACFT, DataUnits, acft_to_cfs, cfs_to_acft};
