use super::{constants as cte, Disposition, PpeRates, StaffingRatios};
use crate::{
    calibration::CalibrationStrategy,
    error::{Error, Result},
    prelude::{Category, Day, PerCategory, Real, Wards},
};
use chrono::{Duration, Local, NaiveDate};
use getset::{CopyGetters, Setters};
use log::warn;
use serde::{Deserialize, Serialize};

/// Full set of assumptions for a single projection run.
///
/// Exactly one of `doubling_time` or `date_first_hospitalized` selects the
/// calibration mode. If both are present the doubling time wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Parameters {
    /// Regional population.
    population: u64,
    /// Fraction of the regional cases seen by the modeled hospitals.
    market_share: Real,
    /// People already recovered at the start of the simulation.
    recovered: Real,
    /// Average number of days an infected person spreads the disease.
    infectious_days: Real,

    non_icu: Disposition,
    icu: Disposition,
    ventilators: Disposition,
    /// Length of stay in a non-ICU bed after leaving the ICU. Zero disables
    /// the step-down pathway.
    non_icu_after_icu_days: u32,

    /// Reduction of contacts after mitigation starts, in [0, 1].
    relative_contact_rate: Real,
    doubling_time: Option<Real>,
    date_first_hospitalized: Option<NaiveDate>,
    mitigation_date: Option<NaiveDate>,

    /// Non-ICU census observed at `covid_census_date` (day 0).
    covid_census_value: Real,
    covid_census_date: NaiveDate,
    n_days: u32,

    total_covid_beds: u32,
    icu_covid_beds: u32,
    covid_ventilators: u32,
    beds_borrow: bool,

    ppe: Wards<PpeRates>,
    staffing: Wards<StaffingRatios>,
    /// Shift duration in hours.
    shift_duration: Real,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            population: cte::POPULATION,
            market_share: cte::MARKET_SHARE,
            recovered: 0.0,
            infectious_days: cte::INFECTIOUS_DAYS,
            non_icu: Disposition::new(cte::NON_ICU_RATE, cte::NON_ICU_DAYS),
            icu: Disposition::new(cte::ICU_RATE, cte::ICU_DAYS),
            ventilators: Disposition::new(cte::VENTILATORS_RATE, cte::VENTILATORS_DAYS),
            non_icu_after_icu_days: 0,
            relative_contact_rate: cte::RELATIVE_CONTACT_RATE,
            doubling_time: Some(cte::DOUBLING_TIME),
            date_first_hospitalized: None,
            mitigation_date: None,
            covid_census_value: cte::COVID_CENSUS_VALUE,
            covid_census_date: Local::now().date_naive(),
            n_days: cte::N_DAYS,
            total_covid_beds: cte::TOTAL_COVID_BEDS,
            icu_covid_beds: cte::ICU_COVID_BEDS,
            covid_ventilators: cte::COVID_VENTILATORS,
            beds_borrow: true,
            ppe: PpeRates::default_rates(),
            staffing: StaffingRatios::default_ratios(),
            shift_duration: cte::SHIFT_DURATION,
        }
    }
}

impl Parameters {
    /// Rates and lengths of stay for all categories.
    pub fn dispositions(&self) -> PerCategory<Disposition> {
        PerCategory::new(self.non_icu, self.icu, self.ventilators)
    }

    /// Disposition for a single category.
    pub fn disposition(&self, category: Category) -> Disposition {
        *self.dispositions().get(category)
    }

    /// Recovery rate.
    pub fn gamma(&self) -> Real {
        1.0 / self.infectious_days
    }

    /// Day index of the given date relative to the census date.
    pub fn day_of(&self, date: NaiveDate) -> Day {
        (date - self.covid_census_date).num_days()
    }

    /// Calendar date of the given day index.
    pub fn date_of(&self, day: Day) -> NaiveDate {
        self.covid_census_date + Duration::days(day)
    }

    /// Day in which mitigation starts, if a mitigation date is given.
    pub fn mitigation_day(&self) -> Option<Day> {
        self.mitigation_date.map(|d| self.day_of(d))
    }

    /// Select the calibration strategy from the available anchors.
    pub fn strategy(&self) -> Result<CalibrationStrategy> {
        match (self.doubling_time, self.date_first_hospitalized) {
            (Some(dt), Some(date)) => {
                warn!(
                    "both doubling_time ({}) and date_first_hospitalized ({}) given; using doubling_time",
                    dt, date
                );
                Ok(CalibrationStrategy::KnownDoublingTime(dt))
            }
            (Some(dt), None) => Ok(CalibrationStrategy::KnownDoublingTime(dt)),
            (None, Some(date)) => Ok(CalibrationStrategy::KnownFirstHospitalized(date)),
            (None, None) => Err(Error::MissingAnchor),
        }
    }

    /// Check parameters for values that would make the projection meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(Error::invalid("population", "must be positive"));
        }
        if !(self.market_share > 0.0 && self.market_share <= 1.0) {
            return Err(Error::invalid("market_share", "must be in (0, 1]"));
        }
        if self.recovered < 0.0 {
            return Err(Error::invalid("recovered", "must be non-negative"));
        }
        if !(self.infectious_days > 0.0) {
            return Err(Error::invalid("infectious_days", "must be positive"));
        }
        for &category in Category::ALL.iter() {
            let rate = self.disposition(category).rate();
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::invalid(category_rate_name(category), "must be in [0, 1]"));
            }
        }
        if self.non_icu.rate() == 0.0 {
            return Err(Error::invalid("non_icu.rate", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.relative_contact_rate) {
            return Err(Error::invalid("relative_contact_rate", "must be in [0, 1]"));
        }
        if let Some(dt) = self.doubling_time {
            if !(dt > 0.0) {
                return Err(Error::invalid("doubling_time", "must be positive"));
            }
        }
        if let Some(date) = self.date_first_hospitalized {
            if date > self.covid_census_date {
                return Err(Error::invalid(
                    "date_first_hospitalized",
                    format!("{} is after the census date {}", date, self.covid_census_date),
                ));
            }
        }
        if !(self.covid_census_value >= 0.0) {
            return Err(Error::invalid("covid_census_value", "must be non-negative"));
        }
        if self.n_days == 0 {
            return Err(Error::invalid("n_days", "must be positive"));
        }
        if self.icu_covid_beds > self.total_covid_beds {
            return Err(Error::invalid("icu_covid_beds", "exceeds total_covid_beds"));
        }
        if !(self.shift_duration > 0.0) {
            return Err(Error::invalid("shift_duration", "must be positive"));
        }
        if (self.population as Real) <= 1.0 / self.market_share / self.non_icu.rate() {
            return Err(Error::invalid(
                "population",
                "too small for the seed infections implied by market_share and non_icu.rate",
            ));
        }
        Ok(())
    }
}

fn category_rate_name(category: Category) -> &'static str {
    match category {
        Category::NonIcu => "non_icu.rate",
        Category::Icu => "icu.rate",
        Category::Ventilators => "ventilators.rate",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let p = Parameters::default();
        assert!(p.validate().is_ok());
        assert!(matches!(p.strategy(), Ok(CalibrationStrategy::KnownDoublingTime(_))));
    }

    #[test]
    fn missing_anchor_is_fatal() {
        let mut p = Parameters::default();
        p.set_doubling_time(None);
        assert!(matches!(p.strategy(), Err(Error::MissingAnchor)));
    }

    #[test]
    fn first_hospitalized_selects_mode_b() {
        let mut p = Parameters::default();
        p.set_doubling_time(None)
            .set_covid_census_date(date(2020, 4, 1))
            .set_date_first_hospitalized(Some(date(2020, 3, 10)));
        assert_eq!(
            p.strategy().unwrap(),
            CalibrationStrategy::KnownFirstHospitalized(date(2020, 3, 10))
        );
    }

    #[test]
    fn mitigation_day_is_relative_to_census() {
        let mut p = Parameters::default();
        p.set_covid_census_date(date(2020, 4, 1));
        assert_eq!(p.mitigation_day(), None);
        p.set_mitigation_date(Some(date(2020, 3, 25)));
        assert_eq!(p.mitigation_day(), Some(-7));
        assert_eq!(p.date_of(-7), date(2020, 3, 25));
    }

    #[test]
    fn rejects_bad_values() {
        let mut p = Parameters::default();
        p.set_market_share(0.0);
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidParameter { name: "market_share", .. })
        ));

        let mut p = Parameters::default();
        p.set_covid_census_value(Real::NAN);
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidParameter { name: "covid_census_value", .. })
        ));

        let mut p = Parameters::default();
        p.set_icu(Disposition::new(1.5, 9));
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidParameter { name: "icu.rate", .. })
        ));

        let mut p = Parameters::default();
        p.set_icu_covid_beds(1000);
        assert!(p.validate().is_err());
    }

    #[test]
    fn reads_toml() {
        let p: Parameters = toml::from_str(
            r#"
            population = 1000000
            doubling_time = 5.0
            covid_census_date = "2020-04-01"
            mitigation_date = "2020-03-20"

            [icu]
            rate = 0.01
            days = 8

            [staffing.icu]
            nurses = 3.0

            [ppe.icu]
            masks_n95 = 12.0
            "#,
        )
        .unwrap();
        assert_eq!(p.population(), 1_000_000);
        assert_eq!(p.doubling_time(), Some(5.0));
        assert_eq!(p.icu(), Disposition::new(0.01, 8));
        assert_eq!(p.non_icu().days(), cte::NON_ICU_DAYS);
        assert_eq!(p.mitigation_day(), Some(-12));

        // Fields and wards that are not given keep their defaults
        let ratios = StaffingRatios::default_ratios();
        assert_eq!(p.staffing().icu.nurses(), 3.0);
        assert_eq!(p.staffing().icu.physicians(), ratios.icu.physicians());
        assert_eq!(p.staffing().non_icu, ratios.non_icu);
        assert_eq!(p.ppe().icu.masks_n95(), 12.0);
        assert_eq!(p.ppe().icu.gloves(), PpeRates::default_rates().icu.gloves());
        assert_eq!(p.ppe().non_icu, PpeRates::default_rates().non_icu);
    }
}
