use super::Trajectory;
use crate::prelude::{Day, Real};
use serde::{Deserialize, Serialize};

/// A period of constant contact rate lasting `days` steps.
///
/// A single mitigation event is modeled by two consecutive segments: the
/// pre-mitigation beta followed by the reduced beta_t.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub beta: Real,
    pub days: u32,
}

impl Policy {
    pub fn new(beta: Real, days: u32) -> Self {
        Policy { beta, days }
    }
}

/// Compartment counts at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SirState {
    pub susceptible: Real,
    pub infected: Real,
    pub recovered: Real,
}

impl SirState {
    pub fn new(susceptible: Real, infected: Real, recovered: Real) -> Self {
        SirState {
            susceptible,
            infected,
            recovered,
        }
    }

    /// Total population.
    pub fn total(&self) -> Real {
        self.susceptible + self.infected + self.recovered
    }

    /// Advance the SIR model by one time step.
    ///
    /// The result is rescaled so the compartments always sum to n.
    pub fn step(&self, beta: Real, gamma: Real, n: Real) -> SirState {
        let (s, i, r) = (self.susceptible, self.infected, self.recovered);
        let s_n = s - beta * s * i;
        let i_n = i + beta * s * i - gamma * i;
        let r_n = r + gamma * i;
        let scale = n / (s_n + i_n + r_n);
        SirState::new(s_n * scale, i_n * scale, r_n * scale)
    }
}

/// Simulate the SIR model forward in time under a sequence of policies.
///
/// The first row of the trajectory is labeled `start_day` and there is one
/// row per simulated step plus the initial state.
pub fn simulate(initial: SirState, gamma: Real, start_day: Day, policies: &[Policy]) -> Trajectory {
    let n = initial.total();
    let total_days = 1 + policies.iter().map(|p| p.days as usize).sum::<usize>();
    let mut trajectory = Trajectory::with_capacity(total_days);
    let mut state = initial;
    let mut day = start_day;

    for policy in policies {
        for _ in 0..policy.days {
            trajectory.push(day, &state);
            state = state.step(policy.beta, gamma, n);
            day += 1;
        }
    }
    trajectory.push(day, &state);
    return trajectory.build();
}

/// Average daily growth rate implied by a doubling time.
///
/// An absent or null doubling time means no growth.
pub fn growth_rate(doubling_time: Option<Real>) -> Real {
    match doubling_time {
        Some(dt) if dt != 0.0 => (2.0 as Real).powf(1.0 / dt) - 1.0,
        _ => 0.0,
    }
}

/// Contact rate reproducing the given growth rate at the start of an epidemic,
/// reduced by the relative contact rate.
pub fn beta(growth_rate: Real, gamma: Real, susceptible: Real, relative_contact_rate: Real) -> Real {
    (growth_rate + gamma) / susceptible * (1.0 - relative_contact_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn seed() -> SirState {
        SirState::new(999_000.0, 1_000.0, 0.0)
    }

    #[test]
    fn growth_rate_from_doubling_time() {
        assert_approx_eq!(growth_rate(Some(1.0)), 1.0);
        assert_approx_eq!(growth_rate(Some(4.0)), 0.189207, 1e-6);
        assert_eq!(growth_rate(None), 0.0);
        assert_eq!(growth_rate(Some(0.0)), 0.0);
    }

    #[test]
    fn beta_reproduces_growth() {
        let s = seed();
        let gamma = 1.0 / 14.0;
        let g = growth_rate(Some(4.0));
        let b = beta(g, gamma, s.susceptible, 0.0);
        let next = s.step(b, gamma, s.total());

        // Early in the epidemic infections grow by roughly (1 + g) per day
        assert_approx_eq!(next.infected / s.infected, 1.0 + g, 1e-3);
        assert_approx_eq!(beta(g, gamma, s.susceptible, 0.5), 0.5 * b);
    }

    #[test]
    fn trajectory_length_and_days() {
        let policies = [Policy::new(2e-7, 5), Policy::new(1e-7, 10)];
        let traj = simulate(seed(), 0.1, -5, &policies);
        assert_eq!(traj.len(), 16);
        assert_eq!(traj.day[0], -5);
        assert_eq!(traj.day[5], 0);
        assert_eq!(*traj.day.last().unwrap(), 10);
        assert_eq!(traj.susceptible[0], 999_000.0);
    }

    #[test]
    fn compartments_are_conserved() {
        let policies = [Policy::new(3e-7, 100), Policy::new(1e-7, 200)];
        let traj = simulate(seed(), 1.0 / 14.0, 0, &policies);
        for t in 0..traj.len() {
            let n = traj.susceptible[t] + traj.infected[t] + traj.recovered[t];
            assert_approx_eq!(n, 1_000_000.0, 1e-6);
            assert_approx_eq!(traj.ever_infected[t], traj.infected[t] + traj.recovered[t]);
        }
    }

    #[test]
    fn empty_policy_keeps_initial_state() {
        let traj = simulate(seed(), 0.1, 3, &[]);
        assert_eq!(traj.len(), 1);
        assert_eq!(traj.day[0], 3);
        assert_eq!(traj.state(0), seed());
    }
}
