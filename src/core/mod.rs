//! Draft types, field validation, GSTIN checks and totals.
//!
//! Everything in this module is pure: no timers, no storage.

mod builder;
mod currencies;
mod error;
pub mod gstin;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use currencies::*;
pub use error::*;
pub use gstin::{GSTIN_EXAMPLE, GSTIN_GUIDANCE, validate_gstin};
pub use totals::*;
pub use types::*;
pub use validation::*;
