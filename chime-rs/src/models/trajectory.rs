use super::SirState;
use crate::prelude::{Day, Real, Series};
use ndarray::Array1;

/// Day-indexed output of the SIR simulator.
///
/// Day 0 is the census date. Every column has the same length and
/// `susceptible + infected + recovered` is constant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub day: Vec<Day>,
    pub susceptible: Series,
    pub infected: Series,
    pub recovered: Series,
    pub ever_infected: Series,
}

impl Trajectory {
    /// Build a trajectory from columns. `ever_infected` is computed from the
    /// infected and recovered columns.
    pub fn from_columns(day: Vec<Day>, susceptible: Series, infected: Series, recovered: Series) -> Self {
        let ever_infected = &infected + &recovered;
        Trajectory {
            day,
            susceptible,
            infected,
            recovered,
            ever_infected,
        }
    }

    pub(crate) fn with_capacity(n: usize) -> TrajectoryBuilder {
        TrajectoryBuilder {
            day: Vec::with_capacity(n),
            susceptible: Vec::with_capacity(n),
            infected: Vec::with_capacity(n),
            recovered: Vec::with_capacity(n),
        }
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty()
    }

    /// Row index of the given day, if present.
    pub fn index_of(&self, day: Day) -> Option<usize> {
        let first = *self.day.first()?;
        let idx = day - first;
        if idx < 0 || idx as usize >= self.len() {
            return None;
        }
        Some(idx as usize)
    }

    /// Compartments at the i-th row.
    pub fn state(&self, i: usize) -> SirState {
        SirState::new(self.susceptible[i], self.infected[i], self.recovered[i])
    }
}

/// Accumulates rows while the simulator runs.
pub(crate) struct TrajectoryBuilder {
    day: Vec<Day>,
    susceptible: Vec<Real>,
    infected: Vec<Real>,
    recovered: Vec<Real>,
}

impl TrajectoryBuilder {
    pub(crate) fn push(&mut self, day: Day, state: &SirState) {
        self.day.push(day);
        self.susceptible.push(state.susceptible);
        self.infected.push(state.infected);
        self.recovered.push(state.recovered);
    }

    pub(crate) fn build(self) -> Trajectory {
        Trajectory::from_columns(
            self.day,
            Array1::from(self.susceptible),
            Array1::from(self.infected),
            Array1::from(self.recovered),
        )
    }
}
