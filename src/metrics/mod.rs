//! Numeric building blocks shared by the analyzers
//!
//! - [`numeric`]: min-max normalization and the Gini balance score
//! - [`stats`]: geometric mean, interpolated median, rounding helpers
//! - [`icc`]: two-way agreement intraclass correlation
//!
//! Vectors use `f64::NAN` for missing entries throughout.

pub mod icc;
pub mod numeric;
pub mod stats;

pub use icc::{icc_agreement_single, IccError, IccSummary};
pub use numeric::{gini_balance, normalize, zero_nan};
pub use stats::{geometric_mean, interpolated_median, max_finite, mean, min_finite, round_to};
