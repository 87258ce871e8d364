use crate::{
    cascade::DispositionSeries,
    models::{beta, growth_rate, simulate, Policy, SirState, Trajectory},
    params::{Disposition, Parameters},
    prelude::{Day, PerCategory, Real, INF},
    utils::squared_error,
};

/// Series whose peak must not precede the census date for a candidate to be
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakCheck {
    /// Non-ICU census.
    Census,
    /// Non-ICU admissions.
    Admits,
}

/// A point in the calibration search space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Days between the first hospitalization and the census date.
    pub i_day: Day,
    pub doubling_time: Real,
}

impl Candidate {
    pub fn new(i_day: Day, doubling_time: Real) -> Self {
        Candidate {
            i_day,
            doubling_time,
        }
    }
}

/// Result of simulating a single candidate. Rejected candidates have an
/// infinite loss.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub candidate: Candidate,
    pub trajectory: Trajectory,
    pub dispositions: DispositionSeries,
    pub loss: Real,
}

impl Evaluation {
    pub fn is_rejected(&self) -> bool {
        !self.loss.is_finite()
    }
}

/// Everything a candidate evaluation needs from the parameters.
///
/// The setup is immutable and shared by reference between (possibly parallel)
/// evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setup {
    pub initial: SirState,
    pub gamma: Real,
    pub relative_contact_rate: Real,
    /// Day the contact reduction starts, if a mitigation date was given.
    pub mitigation_day: Option<Day>,
    /// Observed non-ICU census on day 0.
    pub anchor: Real,
    pub dispositions: PerCategory<Disposition>,
    pub market_share: Real,
    pub non_icu_after_icu_days: u32,
    /// Length of the projection window.
    pub n_days: u32,
}

impl Setup {
    pub fn new(params: &Parameters) -> Self {
        Setup {
            initial: initial_state(params),
            gamma: params.gamma(),
            relative_contact_rate: params.relative_contact_rate(),
            mitigation_day: params.mitigation_day(),
            anchor: params.covid_census_value(),
            dispositions: params.dispositions(),
            market_share: params.market_share(),
            non_icu_after_icu_days: params.non_icu_after_icu_days(),
            n_days: params.n_days(),
        }
    }

    /// Contact rates before and after mitigation for a doubling time.
    pub fn betas(&self, doubling_time: Real) -> (Real, Real) {
        let g = growth_rate(Some(doubling_time));
        let s = self.initial.susceptible;
        (
            beta(g, self.gamma, s, 0.0),
            beta(g, self.gamma, s, self.relative_contact_rate),
        )
    }

    /// Policy segments covering `i_day` days of history and `n_days` of
    /// projection, switching to the mitigated contact rate on the mitigation
    /// day (the census date if none was given). Mitigation cannot start
    /// before the simulation does.
    pub fn policy(&self, doubling_time: Real, i_day: Day, n_days: u32) -> Vec<Policy> {
        let (beta, beta_t) = self.betas(doubling_time);
        let mitigation_day = self.mitigation_day.unwrap_or(0).max(-i_day);
        let pre = i_day + mitigation_day;
        let post = i_day + n_days as Day - pre;
        vec![
            Policy::new(beta, pre.max(0) as u32),
            Policy::new(beta_t, post.max(0) as u32),
        ]
    }

    /// Simulate a candidate. The first row is day `-i_day`.
    pub fn simulate(&self, candidate: Candidate, n_days: u32) -> Trajectory {
        let policies = self.policy(candidate.doubling_time, candidate.i_day, n_days);
        simulate(self.initial, self.gamma, -candidate.i_day, &policies)
    }

    pub fn cascade(&self, trajectory: &Trajectory) -> DispositionSeries {
        DispositionSeries::compute(
            trajectory,
            &self.dispositions,
            self.market_share,
            self.non_icu_after_icu_days,
        )
    }

    /// Simulate a candidate and score it against the observed census.
    pub fn evaluate(&self, candidate: Candidate, n_days: u32, check: PeakCheck) -> Evaluation {
        let trajectory = self.simulate(candidate, n_days);
        let dispositions = self.cascade(&trajectory);
        let loss = self.loss(candidate.i_day, &dispositions, check);
        Evaluation {
            candidate,
            trajectory,
            dispositions,
            loss,
        }
    }

    /// Squared error between the projected and observed census on day 0, or
    /// infinity if the peak comes before it.
    pub fn loss(&self, i_day: Day, dispositions: &DispositionSeries, check: PeakCheck) -> Real {
        let peak = match check {
            PeakCheck::Census => dispositions.census_peak_index(),
            PeakCheck::Admits => dispositions.admits_peak_index(),
        };
        let idx = i_day as usize;
        match peak {
            Some(peak) if peak as Day >= i_day && idx < dispositions.len() => {
                squared_error(dispositions.census.non_icu[idx], self.anchor)
            }
            _ => INF,
        }
    }
}

/// Infected people on the day the first patient is hospitalized: exactly one
/// expected hospitalization for the region.
pub fn initial_state(params: &Parameters) -> SirState {
    let infected = 1.0 / params.market_share() / params.non_icu().rate();
    let susceptible = params.population() as Real - infected;
    SirState::new(susceptible, infected, params.recovered())
}
