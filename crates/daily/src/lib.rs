//! Monthly-to-daily disaggregation for headgate.
//!
//! A location's daily flag picks one of three ways to get a daily series:
//!
//! | Flag | Mode | Result |
//! |------|------|--------|
//! | `"0"` | [`DailyMode::Flat`] | monthly volume spread evenly over each month |
//! | own id | [`DailyMode::Direct`] | the location's own daily series |
//! | other id | [`DailyMode::Pattern`] | the other location's daily series scaled to this location's monthly values |
//!
//! [`is_available`] and [`estimate_daily`] run the same input checks, so a
//! caller can ask first and estimate later.
//!
//! # Quick start
//!
//! ```ignore
//! use headgate_daily::{DailyOptions, estimate_daily};
//!
//! let options = DailyOptions::new();
//! if let Some(daily) = estimate_daily("0801001", "08010500", Some(&monthly), Some(&template), &options) {
//!     println!("{} days", daily.len());
//! }
//! ```

mod config;
mod error;
mod estimate;
mod flat;
mod mode;
mod pattern;

pub use config::DailyOptions;
pub use error::DailyError;
pub use estimate::{estimate_daily, is_available};
pub use mode::{DailyMode, FLAT_FLAG, select_mode};
