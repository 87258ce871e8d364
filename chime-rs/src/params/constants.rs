use crate::prelude::Real;

///////////////////////////////////////////////////////////////////////////////
// Default params for COVID-19 hospital planning
///////////////////////////////////////////////////////////////////////////////

pub const POPULATION: u64 = 3_600_000;
pub const MARKET_SHARE: Real = 0.15;
pub const INFECTIOUS_DAYS: Real = 14.0;
pub const RELATIVE_CONTACT_RATE: Real = 0.30;
pub const DOUBLING_TIME: Real = 4.0;
pub const N_DAYS: u32 = 60;
pub const COVID_CENSUS_VALUE: Real = 10.0;

// Dispositions: (rate, length of stay)
pub const NON_ICU_RATE: Real = 0.025;
pub const NON_ICU_DAYS: u32 = 7;
pub const ICU_RATE: Real = 0.0075;
pub const ICU_DAYS: u32 = 9;
pub const VENTILATORS_RATE: Real = 0.005;
pub const VENTILATORS_DAYS: u32 = 10;

// Capacity reserved for COVID patients
pub const TOTAL_COVID_BEDS: u32 = 300;
pub const ICU_COVID_BEDS: u32 = 50;
pub const COVID_VENTILATORS: u32 = 40;

// Staffing
pub const SHIFT_DURATION: Real = 12.0;

// Calibration
/// Horizon used to locate the anchor day on an unmitigated curve.
pub const CALIBRATION_HORIZON: u32 = 1000;
/// Upper (exclusive) bound of the anchor day search under mitigation.
pub const MAX_ANCHOR_DAY: u32 = 90;
/// Doubling time grid used by the coarse search.
pub const DOUBLING_TIME_GRID: (Real, Real) = (1.0, 15.0);
pub const GRID_POINTS: usize = 15;
pub const GRID_REFINEMENTS: usize = 4;

// Empirical forecasts
/// Minimum number of cumulative cases before calling the forecast service.
pub const MIN_FORECAST_CASES: u64 = 5;
