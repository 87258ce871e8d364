//! Conversion of infection curves into hospital admissions and census.
mod census;
mod dispositions;
pub use census::*;
pub use dispositions::*;
