use ndarray::Array1;
use serde::{
    de::{DeserializeOwned, Deserializer, Error as _},
    Deserialize, Serialize,
};
use serde_json::Value;

pub use crate::calibration::{Calibration, CalibrationOptions, CalibrationStrategy};
pub use crate::cascade::DispositionSeries;
pub use crate::error::{Error, Result};
pub use crate::models::{Policy, Trajectory};
pub use crate::params::{Disposition, Parameters, PpeRates, StaffingRatios};
pub use crate::projection::Projection;
pub use crate::resources::{BedSeries, PpeItem, PpeSeries, StaffRole, StaffingSeries};

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;
pub(crate) const INF: Real = Real::INFINITY;
pub(crate) const NAN: Real = Real::NAN;

/// Day index relative to the census (anchor) date. Negative values are
/// back-projected history.
pub type Day = i64;

/// A day-indexed series of real values.
pub type Series = Array1<Real>;

/// Patient-care categories tracked by the disposition cascade.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NonIcu,
    Icu,
    Ventilators,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NonIcu, Category::Icu, Category::Ventilators];

    /// Column name used in output tables.
    pub fn key(self) -> &'static str {
        match self {
            Category::NonIcu => "non_icu",
            Category::Icu => "icu",
            Category::Ventilators => "ventilators",
        }
    }
}

/// A value for each disposition category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub non_icu: T,
    pub icu: T,
    pub ventilators: T,
}

impl<T> PerCategory<T> {
    pub fn new(non_icu: T, icu: T, ventilators: T) -> Self {
        PerCategory {
            non_icu,
            icu,
            ventilators,
        }
    }

    /// Return the value for the given category.
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::NonIcu => &self.non_icu,
            Category::Icu => &self.icu,
            Category::Ventilators => &self.ventilators,
        }
    }

    /// Maps each component with f.
    pub fn map<S>(&self, f: impl Fn(&T) -> S) -> PerCategory<S> {
        PerCategory {
            non_icu: f(&self.non_icu),
            icu: f(&self.icu),
            ventilators: f(&self.ventilators),
        }
    }

    /// Maps each component with f, which also receives the category.
    pub fn map_with_category<S>(&self, f: impl Fn(Category, &T) -> S) -> PerCategory<S> {
        PerCategory {
            non_icu: f(Category::NonIcu, &self.non_icu),
            icu: f(Category::Icu, &self.icu),
            ventilators: f(Category::Ventilators, &self.ventilators),
        }
    }
}

/// Values for the two bed wards (non-ICU and ICU). Ventilators are not a ward
/// and do not consume PPE or staff on their own.
///
/// When deserialized, a missing ward, or a missing field inside a ward, keeps
/// the value from `Wards::<T>::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Wards<T> {
    pub non_icu: T,
    pub icu: T,
}

impl<T> Wards<T> {
    pub fn new(non_icu: T, icu: T) -> Self {
        Wards { non_icu, icu }
    }
}

impl<'de, T> Deserialize<'de> for Wards<T>
where
    T: Serialize + DeserializeOwned,
    Wards<T>: Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Overrides {
            #[serde(default)]
            non_icu: Option<Value>,
            #[serde(default)]
            icu: Option<Value>,
        }

        let overrides = Overrides::deserialize(deserializer)?;
        let defaults = Wards::<T>::default();
        Ok(Wards {
            non_icu: overlay(&defaults.non_icu, overrides.non_icu).map_err(D::Error::custom)?,
            icu: overlay(&defaults.icu, overrides.icu).map_err(D::Error::custom)?,
        })
    }
}

/// Replace the fields of base present in overrides.
fn overlay<T: Serialize + DeserializeOwned>(base: &T, overrides: Option<Value>) -> serde_json::Result<T> {
    let value = match overrides {
        None => serde_json::to_value(base)?,
        Some(Value::Object(given)) => {
            let mut value = serde_json::to_value(base)?;
            if let Value::Object(fields) = &mut value {
                fields.extend(given);
            }
            value
        }
        Some(other) => other,
    };
    serde_json::from_value(value)
}
