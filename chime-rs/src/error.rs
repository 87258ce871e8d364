use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running a projection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("doubling_time or date_first_hospitalized must be provided")]
    MissingAnchor,

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("calibration failed in {mode} mode: all {candidates} candidates put the peak before the census date")]
    CalibrationFailed { mode: &'static str, candidates: usize },

    #[error("not enough cases to fit a forecast: found {found}, need at least {required}")]
    InsufficientCases { found: u64, required: u64 },

    #[error("forecast service returned status {status}: {message}")]
    Forecast { status: u16, message: String },

    #[error("forecast service returned no rows for the projection window")]
    EmptyForecast,

    #[error("malformed forecast: {0}")]
    MalformedForecast(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
