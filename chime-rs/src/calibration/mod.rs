//! Fit the unknown epidemic quantity against a single observed census.
//!
//! With a known doubling time the search is over the number of days between
//! the first hospitalization and the census date. With a known first
//! hospitalization date it is over the doubling time, using a coarse grid
//! followed by a few rounds of refinement around the best point.
mod candidate;
mod grid;

pub use candidate::*;
pub use grid::*;

use crate::{
    error::{Error, Result},
    params::{
        Parameters, CALIBRATION_HORIZON, DOUBLING_TIME_GRID, GRID_POINTS, GRID_REFINEMENTS,
        MAX_ANCHOR_DAY,
    },
    models::{simulate, Policy},
    prelude::{Day, Real},
    utils::{argmax, argmin, linspace, squared_error},
};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Which anchor is known and therefore which quantity is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CalibrationStrategy {
    /// Fit the first hospitalization day from a doubling time.
    KnownDoublingTime(Real),
    /// Fit the doubling time from the first hospitalization date.
    KnownFirstHospitalized(NaiveDate),
}

impl CalibrationStrategy {
    pub fn mode(&self) -> &'static str {
        match self {
            CalibrationStrategy::KnownDoublingTime(_) => "doubling time",
            CalibrationStrategy::KnownFirstHospitalized(_) => "first hospitalized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationOptions {
    /// Evaluate grid candidates with rayon.
    pub parallel: bool,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        CalibrationOptions { parallel: true }
    }
}

/// Fitted model and search diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub strategy: CalibrationStrategy,
    /// Days between the first hospitalization and the census date.
    pub i_day: Day,
    pub doubling_time: Real,
    pub beta: Real,
    pub beta_t: Real,
    /// Squared census error of the winning candidate.
    pub loss: Real,
    /// Number of candidates simulated or scored.
    pub evaluated: usize,
    /// Number of candidates rejected because the peak preceded the census.
    pub rejected: usize,
}

impl Calibration {
    /// Calibrate the model described by params.
    pub fn calibrate(params: &Parameters, options: CalibrationOptions) -> Result<Calibration> {
        let strategy = params.strategy()?;
        let setup = Setup::new(params);
        Calibration::with_setup(&setup, strategy, params.covid_census_date(), options)
    }

    /// Calibrate from a prepared setup.
    pub fn with_setup(
        setup: &Setup,
        strategy: CalibrationStrategy,
        census_date: NaiveDate,
        options: CalibrationOptions,
    ) -> Result<Calibration> {
        let (candidate, loss, evaluated, rejected) = match strategy {
            CalibrationStrategy::KnownDoublingTime(dt) if setup.mitigation_day.is_none() => {
                fit_unmitigated_i_day(setup, dt)?
            }
            CalibrationStrategy::KnownDoublingTime(dt) => fit_i_day(setup, dt, options)?,
            CalibrationStrategy::KnownFirstHospitalized(date) => {
                let i_day = (census_date - date).num_days();
                fit_doubling_time(setup, i_day, options)?
            }
        };
        let (beta, beta_t) = setup.betas(candidate.doubling_time);
        info!(
            target: "calibration",
            "{} mode: i_day = {}, doubling_time = {:.3}, loss = {:.4} ({} candidates, {} rejected)",
            strategy.mode(),
            candidate.i_day,
            candidate.doubling_time,
            loss,
            evaluated,
            rejected
        );
        Ok(Calibration {
            strategy,
            i_day: candidate.i_day,
            doubling_time: candidate.doubling_time,
            beta,
            beta_t,
            loss,
            evaluated,
            rejected,
        })
    }

    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.i_day, self.doubling_time)
    }

    /// Simulate the fitted model over the projection window.
    pub fn commit(&self, setup: &Setup, n_days: u32) -> Evaluation {
        setup.evaluate(self.candidate(), n_days, PeakCheck::Census)
    }
}

type Fit = (Candidate, Real, usize, usize);

/// Without a mitigation date, run a single long unmitigated epidemic and pick
/// the pre-peak day whose census is closest to the anchor.
fn fit_unmitigated_i_day(setup: &Setup, doubling_time: Real) -> Result<Fit> {
    let (beta, _) = setup.betas(doubling_time);
    let policy = [Policy::new(beta, CALIBRATION_HORIZON)];
    let trajectory = simulate(setup.initial, setup.gamma, 0, &policy);
    let census = setup.cascade(&trajectory).census.non_icu;

    let peak = argmax(census.iter()).unwrap_or(0);
    let losses: Vec<Real> = census
        .iter()
        .take(peak)
        .map(|&x| squared_error(x, setup.anchor))
        .collect();
    match argmin(losses.iter()) {
        Some(i) => Ok((Candidate::new(i as Day, doubling_time), losses[i], peak, 0)),
        None => {
            warn!(target: "calibration", "census peaks on the first day, nothing to fit");
            Err(Error::CalibrationFailed {
                mode: "doubling time",
                candidates: 0,
            })
        }
    }
}

/// With a mitigation date the policy depends on i_day, so every candidate day
/// is simulated separately.
fn fit_i_day(setup: &Setup, doubling_time: Real, options: CalibrationOptions) -> Result<Fit> {
    let candidates: Vec<Candidate> = (0..MAX_ANCHOR_DAY as Day)
        .map(|i_day| Candidate::new(i_day, doubling_time))
        .collect();
    let result = evaluate_grid(candidates, options.parallel, |c| {
        setup
            .evaluate(c, CALIBRATION_HORIZON, PeakCheck::Census)
            .loss
    });
    let rejected = result.rejected();
    match result.best() {
        Some((c, loss)) => Ok((c, loss, result.len(), rejected)),
        None => {
            warn!(target: "calibration", "all {} i_day candidates rejected", result.len());
            Err(Error::CalibrationFailed {
                mode: "doubling time",
                candidates: result.len(),
            })
        }
    }
}

/// Search the doubling time on a coarse grid and refine around the best point.
fn fit_doubling_time(setup: &Setup, i_day: Day, options: CalibrationOptions) -> Result<Fit> {
    let (lo, hi) = DOUBLING_TIME_GRID;
    let mut grid = linspace(lo, hi, GRID_POINTS);
    let mut evaluated = 0;
    let mut rejected = 0;
    let mut round = 0;

    loop {
        let candidates: Vec<Candidate> = grid.iter().map(|&dt| Candidate::new(i_day, dt)).collect();
        let result = evaluate_grid(candidates, options.parallel, |c| {
            setup.evaluate(c, setup.n_days, PeakCheck::Admits).loss
        });
        evaluated += result.len();
        rejected += result.rejected();

        let best = match result.best_index() {
            Some(best) => best,
            None => {
                warn!(
                    target: "calibration",
                    "all doubling times in [{}, {}] rejected",
                    grid[0],
                    grid[grid.len() - 1]
                );
                return Err(Error::CalibrationFailed {
                    mode: "first hospitalized",
                    candidates: result.len(),
                });
            }
        };
        if round == GRID_REFINEMENTS {
            return Ok((result.candidates[best], result.losses[best], evaluated, rejected));
        }
        grid = refine(&grid, best, GRID_POINTS);
        round += 1;
    }
}
