//! Hospital demand projections for epidemics.
//!
//! The crate runs a discrete-time SIR model, calibrates it against a single
//! observed hospital census and converts the resulting infection curve into
//! admissions, census, bed availability, PPE and staffing requirements.
pub mod calibration;
pub mod cascade;
pub mod empirical;
pub mod error;
pub mod models;
pub mod params;
pub mod prelude;
pub mod projection;
pub mod report;
pub mod resources;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::projection::Projection;
