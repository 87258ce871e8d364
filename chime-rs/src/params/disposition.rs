use crate::prelude::Real;
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

/// Assumptions for a patient-care category: the fraction of infections that
/// end up in it and the average length of stay in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Disposition {
    rate: Real,
    days: u32,
}

impl Disposition {
    pub fn new(rate: Real, days: u32) -> Self {
        Disposition { rate, days }
    }
}
