use crate::{
    error::{Error, Result},
    models::Trajectory,
    params::MIN_FORECAST_CASES,
    prelude::{Day, Real},
};
use chrono::NaiveDate;
use log::info;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Smoothing method used by the service to extrapolate the growth metric.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastMethod {
    #[serde(rename = "ets")]
    ExponentialSmoothing,
    #[serde(rename = "loess")]
    Loess,
    #[serde(rename = "spln")]
    Spline,
    #[serde(rename = "lm")]
    Linear,
}

impl ForecastMethod {
    pub fn key(self) -> &'static str {
        match self {
            ForecastMethod::ExponentialSmoothing => "ets",
            ForecastMethod::Loess => "loess",
            ForecastMethod::Spline => "spln",
            ForecastMethod::Linear => "lm",
        }
    }
}

impl Default for ForecastMethod {
    fn default() -> Self {
        ForecastMethod::ExponentialSmoothing
    }
}

/// Growth metric extrapolated by the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastMetric {
    #[serde(rename = "dbT")]
    DoublingTime,
    #[serde(rename = "Rt")]
    ReproductionNumber,
}

impl ForecastMetric {
    pub fn key(self) -> &'static str {
        match self {
            ForecastMetric::DoublingTime => "dbT",
            ForecastMetric::ReproductionNumber => "Rt",
        }
    }
}

impl Default for ForecastMetric {
    fn default() -> Self {
        ForecastMetric::DoublingTime
    }
}

/// New cases reported on a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseCount {
    pub date: NaiveDate,
    pub cases: u64,
}

impl CaseCount {
    pub fn new(date: NaiveDate, cases: u64) -> Self {
        CaseCount { date, cases }
    }
}

/// A row of the forecast table. Extra columns sent by the service are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub s: Real,
    pub i: Real,
    pub r: Real,
    #[serde(default)]
    pub cases: Option<Real>,
}

/// Everything sent to the forecasting service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub method: ForecastMethod,
    pub metric: ForecastMetric,
    pub n_days: u32,
    pub infectious_days: Real,
    pub cases: Vec<CaseCount>,
}

impl ForecastRequest {
    /// Build a request, refusing to fit a forecast on too few cases.
    pub fn new(
        method: ForecastMethod,
        metric: ForecastMetric,
        n_days: u32,
        infectious_days: Real,
        cases: Vec<CaseCount>,
    ) -> Result<Self> {
        check_cases(&cases)?;
        Ok(ForecastRequest {
            method,
            metric,
            n_days,
            infectious_days,
            cases,
        })
    }

    /// Query string parameters understood by the service.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("method", self.method.key().to_string()),
            ("metric", self.metric.key().to_string()),
            ("n_days", self.n_days.to_string()),
            ("inf_days", self.infectious_days.to_string()),
        ]
    }
}

/// A statistical model that extrapolates S/I/R compartments from case counts.
pub trait ForecastService {
    fn forecast(&self, request: &ForecastRequest) -> Result<Vec<ForecastRow>>;
}

/// Fail unless there are at least `MIN_FORECAST_CASES` cumulative cases.
pub fn check_cases(cases: &[CaseCount]) -> Result<()> {
    let found: u64 = cases.iter().map(|c| c.cases).sum();
    if found < MIN_FORECAST_CASES {
        return Err(Error::InsufficientCases {
            found,
            required: MIN_FORECAST_CASES,
        });
    }
    Ok(())
}

/// Convert forecast rows into a trajectory with day 0 on the census date.
///
/// Rows are sorted by date and must be consecutive. Only rows up to
/// `census_date + n_days` are kept.
pub fn trajectory_from_forecast(
    rows: &[ForecastRow],
    census_date: NaiveDate,
    n_days: u32,
) -> Result<Trajectory> {
    let mut rows: Vec<ForecastRow> = rows.to_vec();
    rows.sort_by_key(|r| r.date);
    rows.dedup_by_key(|r| r.date);

    let last = n_days as Day;
    let rows: Vec<ForecastRow> = rows
        .into_iter()
        .take_while(|r| (r.date - census_date).num_days() <= last)
        .collect();

    if rows.is_empty() {
        return Err(Error::EmptyForecast);
    }
    for pair in rows.windows(2) {
        if (pair[1].date - pair[0].date).num_days() != 1 {
            return Err(Error::MalformedForecast(format!(
                "gap between {} and {}",
                pair[0].date, pair[1].date
            )));
        }
    }
    info!(
        target: "empirical",
        "forecast covers {} to {} ({} rows)",
        rows[0].date,
        rows[rows.len() - 1].date,
        rows.len()
    );

    let day = rows.iter().map(|r| (r.date - census_date).num_days()).collect();
    let s = Array1::from(rows.iter().map(|r| r.s).collect::<Vec<_>>());
    let i = Array1::from(rows.iter().map(|r| r.i).collect::<Vec<_>>());
    let r = Array1::from(rows.iter().map(|r| r.r).collect::<Vec<_>>());
    Ok(Trajectory::from_columns(day, s, i, r))
}
