//! This module declares parameters for the chime crate.
//!
//! Parameters are immutable during a projection run. They are usually loaded
//! from a configuration file, validated once and then shared by reference with
//! the simulator, the calibration engine and the derived resource tables.
mod constants;
mod disposition;
mod parameters;
mod resources;

pub use constants::*;
pub use disposition::*;
pub use parameters::*;
pub use resources::*;
