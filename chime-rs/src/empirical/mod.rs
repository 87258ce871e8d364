//! Projections driven by an external statistical forecasting service instead
//! of the calibrated SIR model.
//!
//! The service receives the daily case counts observed in the region and
//! returns an S/I/R table which goes through the same hospital cascade as a
//! simulated trajectory.
mod forecast;
#[cfg(feature = "http")]
mod http;

pub use forecast::*;
#[cfg(feature = "http")]
pub use http::*;
