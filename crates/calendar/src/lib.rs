//! # headgate-calendar
//!
//! Gregorian step arithmetic for day, month, and year series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"truncate()"| B["step date"]
//!     B -->|"advance()"| B
//!     B -->|"steps_between()"| C["step index"]
//!     B -->|"date_sequence()"| D["Vec of step dates"]
//!     B -->|"end_of_step() / days_in_step()"| E["step extent"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use headgate_calendar::{Interval, date_sequence, days_in_month, ymd};
//!
//! let months = date_sequence(ymd(2000, 1, 1)?, ymd(2000, 12, 1)?, Interval::Month)?;
//! assert_eq!(months.len(), 12);
//! assert_eq!(days_in_month(2000, 2)?, 29);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `interval` | Series intervals and month-length tables |
//! | `date` | Truncation and step arithmetic |
//! | `sequence` | Step date sequence generation |
//! | `error` | Error types |

mod date;
mod error;
mod interval;
mod sequence;

pub use chrono::{Datelike, NaiveDate};
pub use date::{advance, days_in_step, end_of_step, steps_between, truncate, ymd};
pub use error::CalendarError;
pub use interval::{Interval, days_in_month, days_in_year, is_leap_year};
pub use sequence::date_sequence;
