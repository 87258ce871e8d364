//! Complete projection runs: calibration, cascade and derived resources.
use crate::{
    calibration::{Calibration, CalibrationOptions, CalibrationStrategy, Setup},
    cascade::DispositionSeries,
    empirical::{
        trajectory_from_forecast, CaseCount, ForecastMethod, ForecastMetric, ForecastRequest,
        ForecastService,
    },
    error::Result,
    models::{growth_rate, SirState, Trajectory},
    params::Parameters,
    prelude::{Real, Series},
    report::{category_table, Table, ToTable},
    resources::{BedSeries, PpeSeries, StaffingSeries},
};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

/// Summary values of a calibrated model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub intrinsic_growth_rate: Real,
    pub r_naught: Real,
    pub r_t: Real,
    pub doubling_time: Real,
    /// Doubling time under mitigation.
    pub doubling_time_t: Real,
    pub daily_growth_rate: Real,
    pub daily_growth_rate_t: Real,
    /// Compartments on the census date.
    pub census_day_state: SirState,
    /// Given, or estimated from the fitted number of days before the census.
    pub date_first_hospitalized: NaiveDate,
}

impl Metrics {
    pub fn new(calibration: &Calibration, setup: &Setup, trajectory: &Trajectory, params: &Parameters) -> Self {
        let s = setup.initial.susceptible;
        let gamma = setup.gamma;
        let doubling_time_t = 1.0 / (calibration.beta_t * s - gamma + 1.0).log2();
        let census_day_state = trajectory
            .index_of(0)
            .map(|i| trajectory.state(i))
            .unwrap_or_default();
        let date_first_hospitalized = match calibration.strategy {
            CalibrationStrategy::KnownFirstHospitalized(date) => date,
            CalibrationStrategy::KnownDoublingTime(_) => params.date_of(-calibration.i_day),
        };

        Metrics {
            intrinsic_growth_rate: growth_rate(Some(calibration.doubling_time)),
            r_naught: calibration.beta / gamma * s,
            r_t: calibration.beta_t / gamma * s,
            doubling_time: calibration.doubling_time,
            doubling_time_t,
            daily_growth_rate: growth_rate(Some(calibration.doubling_time)),
            daily_growth_rate_t: growth_rate(Some(doubling_time_t)),
            census_day_state,
            date_first_hospitalized,
        }
    }
}

/// Projected hospital demand for a single set of parameters.
#[derive(Debug, Clone)]
pub struct Projection {
    pub params: Parameters,
    /// Absent when the trajectory comes from a forecast.
    pub calibration: Option<Calibration>,
    pub metrics: Option<Metrics>,
    pub trajectory: Trajectory,
    pub dispositions: DispositionSeries,
    /// Beds left after borrowing between wards, if enabled.
    pub beds: BedSeries,
    pub ppe: PpeSeries,
    pub staffing: StaffingSeries,
}

impl Projection {
    /// Calibrate the SIR model and derive all hospital series.
    pub fn run(params: &Parameters) -> Result<Projection> {
        Projection::run_with(params, CalibrationOptions::default())
    }

    pub fn run_with(params: &Parameters, options: CalibrationOptions) -> Result<Projection> {
        params.validate()?;
        let strategy = params.strategy()?;
        let setup = Setup::new(params);
        let calibration = Calibration::with_setup(&setup, strategy, params.covid_census_date(), options)?;
        let evaluation = calibration.commit(&setup, params.n_days());
        let metrics = Metrics::new(&calibration, &setup, &evaluation.trajectory, params);
        info!(
            "r_naught = {:.2}, r_t = {:.2}, doubling_time_t = {:.2}, first hospitalized on {}",
            metrics.r_naught, metrics.r_t, metrics.doubling_time_t, metrics.date_first_hospitalized
        );

        Ok(Projection::derive(
            params,
            Some(calibration),
            Some(metrics),
            evaluation.trajectory,
            evaluation.dispositions,
        ))
    }

    /// Use an externally forecast S/I/R table instead of the SIR model.
    pub fn from_forecast(
        params: &Parameters,
        service: &impl ForecastService,
        method: ForecastMethod,
        metric: ForecastMetric,
        cases: Vec<CaseCount>,
    ) -> Result<Projection> {
        params.validate()?;
        let request = ForecastRequest::new(method, metric, params.n_days(), params.infectious_days(), cases)?;
        let rows = service.forecast(&request)?;
        let trajectory = trajectory_from_forecast(&rows, params.covid_census_date(), params.n_days())?;
        let dispositions = DispositionSeries::from_params(&trajectory, params);
        Ok(Projection::derive(params, None, None, trajectory, dispositions))
    }

    fn derive(
        params: &Parameters,
        calibration: Option<Calibration>,
        metrics: Option<Metrics>,
        trajectory: Trajectory,
        dispositions: DispositionSeries,
    ) -> Projection {
        let day = &dispositions.day;
        let census = &dispositions.census;
        let mut beds = BedSeries::compute(
            day,
            census,
            params.total_covid_beds(),
            params.icu_covid_beds(),
            params.covid_ventilators(),
        );
        if params.beds_borrow() {
            beds = beds.reallocate();
        }
        let ppe = PpeSeries::compute(day, census, &params.ppe());
        let staffing = StaffingSeries::compute(day, census, &params.staffing(), params.shift_duration());

        Projection {
            params: *params,
            calibration,
            metrics,
            trajectory,
            dispositions,
            beds,
            ppe,
            staffing,
        }
    }

    pub fn census_date(&self) -> NaiveDate {
        self.params.covid_census_date()
    }

    /// Total census as a plain series.
    pub fn census_total(&self) -> &Series {
        &self.dispositions.census_total
    }

    pub fn sir_table(&self) -> Table {
        self.trajectory.to_table(self.census_date())
    }

    /// Cumulative patients per category.
    pub fn dispositions_table(&self) -> Table {
        category_table(&self.dispositions.day, &self.dispositions.ever, self.census_date())
    }

    pub fn admits_table(&self) -> Table {
        let mut table = category_table(&self.dispositions.day, &self.dispositions.admits, self.census_date());
        table
            .add_column("non_icu_after_icu", &self.dispositions.admits_non_icu_after_icu)
            .add_column("total", &self.dispositions.admits_total);
        table
    }

    pub fn census_table(&self) -> Table {
        let mut table = category_table(&self.dispositions.day, &self.dispositions.census, self.census_date());
        table
            .add_column("non_icu_after_icu", &self.dispositions.census_non_icu_after_icu)
            .add_column("total", &self.dispositions.census_total);
        table
    }

    pub fn beds_table(&self) -> Table {
        self.beds.to_table(self.census_date())
    }

    pub fn ppe_table(&self) -> Table {
        self.ppe.to_table(self.census_date())
    }

    pub fn staffing_table(&self) -> Table {
        self.staffing.to_table(self.census_date())
    }

    /// All output tables keyed by file stem.
    pub fn tables(&self) -> Vec<(&'static str, Table)> {
        vec![
            ("sir", self.sir_table()),
            ("dispositions", self.dispositions_table()),
            ("admits", self.admits_table()),
            ("census", self.census_table()),
            ("beds", self.beds_table()),
            ("ppe", self.ppe_table()),
            ("staffing", self.staffing_table()),
        ]
    }
}
