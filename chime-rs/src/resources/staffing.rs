use super::{StaffRole, WardDemand};
use crate::{
    params::StaffingRatios,
    prelude::{Day, PerCategory, Real, Series, Wards},
};

/// Staff needed per day for each role, counted in shifts.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingSeries {
    pub day: Vec<Day>,
    /// One entry per role, in `StaffRole::ALL` order.
    pub roles: Vec<WardDemand>,
}

impl StaffingSeries {
    pub fn compute(
        day: &[Day],
        census: &PerCategory<Series>,
        ratios: &Wards<StaffingRatios>,
        shift_duration: Real,
    ) -> StaffingSeries {
        let shifts_per_day = 24.0 / shift_duration;
        let roles = StaffRole::ALL
            .iter()
            .map(|&role| {
                let non_icu = staff_needed(
                    &census.non_icu,
                    ratios.non_icu.patients_per_staff(role),
                    shifts_per_day,
                );
                let icu = staff_needed(&census.icu, ratios.icu.patients_per_staff(role), shifts_per_day);
                let total = (&non_icu + &icu).mapv(Real::ceil);
                WardDemand { non_icu, icu, total }
            })
            .collect();

        StaffingSeries {
            day: day.to_vec(),
            roles,
        }
    }

    pub fn role(&self, role: StaffRole) -> &WardDemand {
        &self.roles[role as usize]
    }
}

/// Whole staff members for the whole patients present, times the number of
/// shifts per day. A zero ratio means the role is not staffed.
fn staff_needed(census: &Series, patients_per_staff: Real, shifts_per_day: Real) -> Series {
    if patients_per_staff == 0.0 {
        return Series::zeros(census.len());
    }
    census.mapv(|x| ((x.floor() / patients_per_staff).ceil() * shifts_per_day).ceil())
}
