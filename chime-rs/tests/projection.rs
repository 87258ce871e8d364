use assert_approx_eq::assert_approx_eq;
use chime::{
    calibration::{Candidate, PeakCheck, Setup},
    empirical::*,
    models::growth_rate,
    prelude::*,
};
use chrono::{Duration, NaiveDate};

fn census_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, 20).unwrap()
}

fn scenario() -> Parameters {
    let mut p = Parameters::default();
    p.set_population(1_000_000)
        .set_market_share(0.15)
        .set_infectious_days(14.0)
        .set_non_icu(Disposition::new(0.025, 7))
        .set_icu(Disposition::new(0.0075, 9))
        .set_ventilators(Disposition::new(0.005, 10))
        .set_doubling_time(Some(4.0))
        .set_covid_census_value(10.0)
        .set_covid_census_date(census_date());
    p
}

#[test]
fn scenario_matches_observed_census() {
    let proj = Projection::run(&scenario()).unwrap();
    let fit = proj.calibration.unwrap();
    assert!(fit.i_day >= 0);

    let i = proj.trajectory.index_of(0).unwrap();
    assert_eq!(i as Day, fit.i_day);
    assert!((proj.dispositions.census.non_icu[i] - 10.0).abs() < 1.0);
    assert_eq!(proj.trajectory.len(), fit.i_day as usize + 61);
}

#[test]
fn population_is_conserved() {
    let mut p = scenario();
    p.set_mitigation_date(Some(census_date() - Duration::days(3)))
        .set_recovered(5000.0);
    let proj = Projection::run(&p).unwrap();
    let traj = &proj.trajectory;
    for t in 0..traj.len() {
        let n = traj.susceptible[t] + traj.infected[t] + traj.recovered[t];
        assert_approx_eq!(n, 1_000_000.0, 1e-6);
    }
}

#[test]
fn slower_doubling_delays_peak_admissions() {
    let mut p = scenario();
    p.set_relative_contact_rate(0.0);
    let setup = Setup::new(&p);

    let mut last_rate = f64::INFINITY;
    let mut last_peak = 0;
    for &dt in [3.0, 4.0, 6.0, 8.0].iter() {
        let rate = growth_rate(Some(dt));
        let eval = setup.evaluate(Candidate::new(0, dt), 600, PeakCheck::Admits);
        let peak = eval.dispositions.admits_peak_index().unwrap();
        assert!(rate < last_rate);
        assert!(peak > last_peak, "peak {} for doubling time {}", peak, dt);
        last_rate = rate;
        last_peak = peak;
    }
}

#[test]
fn first_hospitalized_recovers_doubling_time() {
    let p = scenario();
    let setup = Setup::new(&p);
    let synthetic = setup.evaluate(Candidate::new(20, 4.0), p.n_days(), PeakCheck::Admits);
    let anchor = synthetic.dispositions.census.non_icu[20];

    let mut q = scenario();
    q.set_doubling_time(None)
        .set_covid_census_value(anchor)
        .set_date_first_hospitalized(Some(census_date() - Duration::days(20)));
    let proj = Projection::run(&q).unwrap();
    let m = proj.metrics.unwrap();
    assert!((m.doubling_time - 4.0).abs() < 0.1);
    assert_eq!(m.date_first_hospitalized, census_date() - Duration::days(20));
}

#[test]
fn no_census_needs_no_staff() {
    // Without a census the only accepted candidate is the first day
    let mut p = scenario();
    p.set_non_icu(Disposition::new(0.025, 0))
        .set_icu(Disposition::new(0.0075, 0))
        .set_mitigation_date(Some(census_date() - Duration::days(3)));
    let proj = Projection::run(&p).unwrap();
    assert_eq!(proj.calibration.unwrap().i_day, 0);
    for &role in StaffRole::ALL.iter() {
        assert!(proj.staffing.role(role).total.iter().all(|&x| x == 0.0));
    }
    for &item in PpeItem::ALL.iter() {
        assert!(proj.ppe.item(item).total.iter().all(|&x| x == 0.0));
    }
}

#[test]
fn long_runs_never_report_negative_demand() {
    let mut p = scenario();
    p.set_n_days(900);
    let proj = Projection::run(&p).unwrap();
    let d = &proj.dispositions;

    assert!(d.census.non_icu.iter().all(|&x| x >= 0.0));
    assert!(d.census.icu.iter().all(|&x| x >= 0.0));
    assert!(d.census_total.iter().all(|&x| x >= 0.0));
    for &item in PpeItem::ALL.iter() {
        assert!(proj.ppe.item(item).total.iter().all(|&x| x >= 0.0), "{:?}", item);
    }
    for &role in StaffRole::ALL.iter() {
        assert!(proj.staffing.role(role).total.iter().all(|&x| x >= 0.0), "{:?}", role);
    }
}

struct FakeService {
    rows: Vec<ForecastRow>,
}

impl ForecastService for FakeService {
    fn forecast(&self, request: &ForecastRequest) -> Result<Vec<ForecastRow>> {
        assert_eq!(request.query()[0].1, "ets");
        Ok(self.rows.clone())
    }
}

struct FailingService;

impl ForecastService for FailingService {
    fn forecast(&self, _request: &ForecastRequest) -> Result<Vec<ForecastRow>> {
        Err(Error::Forecast {
            status: 400,
            message: "not enough data to fit".to_string(),
        })
    }
}

fn cases() -> Vec<CaseCount> {
    (0..10)
        .map(|d| CaseCount::new(census_date() - Duration::days(10 - d), 2))
        .collect()
}

#[test]
fn forecast_rows_feed_the_cascade() {
    let p = scenario();
    let rows: Vec<ForecastRow> = (-10..=80)
        .map(|d: i64| {
            let i = 50.0 * (1.1 as f64).powi(d as i32 + 10);
            ForecastRow {
                date: census_date() + Duration::days(d),
                s: 1_000_000.0 - 2.0 * i,
                i,
                r: i,
                cases: None,
            }
        })
        .collect();
    let service = FakeService { rows };
    let proj = Projection::from_forecast(
        &p,
        &service,
        ForecastMethod::ExponentialSmoothing,
        ForecastMetric::DoublingTime,
        cases(),
    )
    .unwrap();

    assert!(proj.calibration.is_none());
    assert_eq!(proj.trajectory.day[0], -10);
    assert_eq!(*proj.trajectory.day.last().unwrap(), 60);
    assert_eq!(proj.beds.len(), 71);
    assert!(proj.dispositions.census.non_icu[70] > proj.dispositions.census.non_icu[20]);
}

#[test]
fn forecast_errors_are_propagated() {
    let p = scenario();
    let err = Projection::from_forecast(
        &p,
        &FailingService,
        ForecastMethod::Loess,
        ForecastMetric::ReproductionNumber,
        cases(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "forecast service returned status 400: not enough data to fit");

    let err = Projection::from_forecast(
        &p,
        &FailingService,
        ForecastMethod::Loess,
        ForecastMetric::ReproductionNumber,
        cases()[..2].to_vec(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InsufficientCases { found: 4, .. }));
}
