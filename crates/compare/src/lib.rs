//! Period differencing for headgate.
//!
//! Series of any regular interval are reduced to calendar-year volumes with
//! [`to_annual`], then compared year by year with [`average_difference`].
//! Only years that are complete in both series count.
//!
//! ```ignore
//! use headgate_compare::average_difference;
//!
//! match average_difference(&historical, &synthesized, true) {
//!     Some(pct) => println!("{pct:.1}% difference"),
//!     None => println!("no overlapping complete year"),
//! }
//! ```

mod annual;
mod difference;
mod error;

pub use annual::to_annual;
pub use difference::average_difference;
pub use error::CompareError;
