use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

use chime::{
    calibration::CalibrationOptions,
    empirical::{CaseCount, ForecastMethod, ForecastMetric},
    prelude::*,
    utils::plot_hbars,
};
use log::{error, info, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Output {
    dir: PathBuf,
    floor: bool,
    plot: bool,
}

impl Default for Output {
    fn default() -> Self {
        Output {
            dir: PathBuf::from("."),
            floor: true,
            plot: false,
        }
    }
}

/// Project from a forecast of observed cases instead of the SIR model.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Forecast {
    url: Option<String>,
    method: ForecastMethod,
    metric: ForecastMetric,
    /// CSV file with `date` and `cases` columns.
    cases: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    log_level: LevelFilter,
    calibration: CalibrationOptions,
    output: Output,
    forecast: Option<Forecast>,
    params: Parameters,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LevelFilter::Info,
            calibration: CalibrationOptions::default(),
            output: Output::default(),
            forecast: None,
            params: Parameters::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let data = fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }
}

pub fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "chime.toml".to_string());
    let cfg = match Config::load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("could not read {}: {}", path, e);
            process::exit(2);
        }
    };
    if let Err(e) = SimpleLogger::new().with_level(cfg.log_level).init() {
        eprintln!("could not install logger: {}", e);
    }

    if let Err(e) = run(&cfg) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cfg: &Config) -> Result<()> {
    let projection = match &cfg.forecast {
        Some(forecast) => run_forecast(cfg, forecast)?,
        None => Projection::run_with(&cfg.params, cfg.calibration)?,
    };

    if let Some(m) = &projection.metrics {
        info!(
            "R0 = {:.2}, Rt = {:.2}, doubling time = {:.1} days ({:.1} mitigated)",
            m.r_naught, m.r_t, m.doubling_time, m.doubling_time_t
        );
    }

    fs::create_dir_all(&cfg.output.dir)?;
    for (name, table) in projection.tables() {
        let table = if cfg.output.floor { table.floor() } else { table };
        let path = cfg.output.dir.join(format!("{}.csv", name));
        table.save_csv(&path)?;
        info!("wrote {}", path.display());
    }

    if cfg.output.plot {
        let d = &projection.dispositions;
        let start = d.day.iter().position(|&x| x >= 0).unwrap_or(0);
        let census: Vec<Real> = d.census_total.iter().skip(start).cloned().collect();
        println!("{}", plot_hbars(&d.day[start..], &census, 60));
    }
    Ok(())
}

fn read_cases(path: &Path) -> Result<Vec<CaseCount>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut cases = vec![];
    for row in reader.deserialize() {
        cases.push(row?);
    }
    Ok(cases)
}

#[cfg(feature = "http")]
fn run_forecast(cfg: &Config, forecast: &Forecast) -> Result<Projection> {
    use chime::empirical::HttpForecastService;

    let service = match &forecast.url {
        Some(url) => HttpForecastService::new(url.as_str()),
        None => HttpForecastService::default(),
    };
    let cases = read_cases(&forecast.cases)?;
    Projection::from_forecast(&cfg.params, &service, forecast.method, forecast.metric, cases)
}

#[cfg(not(feature = "http"))]
fn run_forecast(_cfg: &Config, forecast: &Forecast) -> Result<Projection> {
    let cases = read_cases(&forecast.cases)?;
    Err(Error::Forecast {
        status: 0,
        message: format!(
            "{} case rows read, but chime was built without the `http` feature",
            cases.len()
        ),
    })
}
