use super::{census_from_admits, shift_forward};
use crate::{
    models::Trajectory,
    params::{Disposition, Parameters},
    prelude::{Day, PerCategory, Real, Series, NAN},
    utils::{argmax, nan_to_num},
};

/// Hospital flows derived from an infection trajectory.
///
/// Totals only add non-ICU and ICU values. Ventilated patients occupy an ICU
/// bed and are counted separately.
#[derive(Debug, Clone, PartialEq)]
pub struct DispositionSeries {
    pub day: Vec<Day>,
    /// Cumulative number of people that ever needed each kind of care.
    pub ever: PerCategory<Series>,
    /// Daily admissions.
    pub admits: PerCategory<Series>,
    /// ICU patients moving to a non-ICU bed after their ICU stay.
    pub admits_non_icu_after_icu: Series,
    pub admits_total: Series,
    /// Patients present each day. The non-ICU census includes step-down
    /// patients.
    pub census: PerCategory<Series>,
    pub census_non_icu_after_icu: Series,
    pub census_total: Series,
}

impl DispositionSeries {
    /// Run the full cascade for the given parameters.
    pub fn from_params(trajectory: &Trajectory, params: &Parameters) -> Self {
        Self::compute(
            trajectory,
            &params.dispositions(),
            params.market_share(),
            params.non_icu_after_icu_days(),
        )
    }

    /// Run the cascade: dispositions, admissions then census.
    pub fn compute(
        trajectory: &Trajectory,
        dispositions: &PerCategory<Disposition>,
        market_share: Real,
        non_icu_after_icu_days: u32,
    ) -> Self {
        let ever = dispositions.map(|d| &trajectory.ever_infected * (d.rate() * market_share));
        let admits = ever.map(admissions);

        let admits_non_icu_after_icu = if non_icu_after_icu_days > 0 {
            shift_forward(&admits.icu, dispositions.icu.days())
        } else {
            Series::zeros(trajectory.len())
        };
        let admits_total = admits.non_icu.mapv(Real::floor) + admits.icu.mapv(Real::floor);

        let census_non_icu_after_icu =
            census_from_admits(&admits_non_icu_after_icu, non_icu_after_icu_days);
        let mut census = admits.map_with_category(|cat, a| {
            census_from_admits(a, dispositions.get(cat).days())
        });
        census.non_icu = &census.non_icu + &census_non_icu_after_icu;
        let census_total = census.non_icu.mapv(Real::floor) + census.icu.mapv(Real::floor);

        DispositionSeries {
            day: trajectory.day.clone(),
            ever,
            admits,
            admits_non_icu_after_icu,
            admits_total,
            census,
            census_non_icu_after_icu,
            census_total,
        }
    }

    pub fn len(&self) -> usize {
        self.day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty()
    }

    /// Row index of the largest non-ICU census.
    pub fn census_peak_index(&self) -> Option<usize> {
        argmax(self.census.non_icu.iter())
    }

    /// Row index of the largest number of non-ICU admissions.
    pub fn admits_peak_index(&self) -> Option<usize> {
        argmax(self.admits.non_icu.iter())
    }
}

/// First difference of a cumulative series. The first day has no previous
/// value and is reported as zero.
fn admissions(ever: &Series) -> Series {
    let mut admits = Series::from_elem(ever.len(), NAN);
    for t in 1..ever.len() {
        admits[t] = ever[t] - ever[t - 1];
    }
    admits.mapv_into(nan_to_num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{simulate, Policy, SirState};
    use assert_approx_eq::assert_approx_eq;
    use ndarray::Array1;

    fn dispositions() -> PerCategory<Disposition> {
        PerCategory::new(
            Disposition::new(0.025, 7),
            Disposition::new(0.0075, 9),
            Disposition::new(0.005, 10),
        )
    }

    fn linear_trajectory(n: usize, per_day: Real) -> Trajectory {
        let ever: Vec<Real> = (0..n).map(|t| t as Real * per_day).collect();
        Trajectory::from_columns(
            (0..n as Day).collect(),
            Array1::zeros(n),
            Array1::zeros(n),
            Array1::from(ever),
        )
    }

    #[test]
    fn admissions_scale_with_rate_and_market_share() {
        // 1000 new infections per day
        let traj = linear_trajectory(30, 1000.0);
        let series = DispositionSeries::compute(&traj, &dispositions(), 0.5, 0);

        assert_eq!(series.admits.non_icu[0], 0.0);
        for t in 1..30 {
            assert_approx_eq!(series.admits.non_icu[t], 12.5);
            assert_approx_eq!(series.admits.icu[t], 3.75);
            assert_approx_eq!(series.admits.ventilators[t], 2.5);
            assert_approx_eq!(series.admits_total[t], 12.0 + 3.0);
        }
        assert_approx_eq!(series.ever.non_icu[10], 10.0 * 1000.0 * 0.025 * 0.5);
    }

    #[test]
    fn census_reaches_rate_times_los() {
        let traj = linear_trajectory(30, 1000.0);
        let series = DispositionSeries::compute(&traj, &dispositions(), 0.5, 0);
        assert_approx_eq!(series.census.non_icu[20], 12.5 * 7.0, 1e-9);
        assert_approx_eq!(series.census.icu[20], 3.75 * 9.0, 1e-9);
        assert_approx_eq!(series.census.ventilators[20], 2.5 * 10.0, 1e-9);

        // Ventilators are not part of the total
        assert_approx_eq!(series.census_total[20], 87.0 + 33.0);
        assert_eq!(series.census_non_icu_after_icu, Series::zeros(30));
    }

    #[test]
    fn step_down_patients_join_non_icu_census() {
        let traj = linear_trajectory(40, 1000.0);
        let base = DispositionSeries::compute(&traj, &dispositions(), 0.5, 0);
        let series = DispositionSeries::compute(&traj, &dispositions(), 0.5, 4);

        // ICU admissions reappear after the ICU length of stay
        assert_eq!(series.admits_non_icu_after_icu[9], 0.0);
        assert_approx_eq!(series.admits_non_icu_after_icu[10], 3.75);
        assert_approx_eq!(series.census_non_icu_after_icu[30], 3.75 * 4.0, 1e-9);
        assert_approx_eq!(
            series.census.non_icu[30],
            base.census.non_icu[30] + 3.75 * 4.0,
            1e-9
        );
        assert_eq!(series.census.icu, base.census.icu);
    }

    #[test]
    fn cascade_of_simulated_epidemic_peaks() {
        let initial = SirState::new(1_000_000.0 - 266.0, 266.0, 0.0);
        let gamma = 1.0 / 14.0;
        let beta = (0.19 + gamma) / initial.susceptible;
        let traj = simulate(initial, gamma, 0, &[Policy::new(beta, 200)]);
        let series = DispositionSeries::compute(&traj, &dispositions(), 0.15, 0);

        let peak = series.census_peak_index().unwrap();
        assert!(peak > 0 && peak < 199);
        assert!(series.admits_peak_index().unwrap() <= peak);
        assert!(series.census.non_icu.iter().all(|&x| x >= -1e-9));
    }
}
