use super::{ForecastRequest, ForecastRow, ForecastService};
use crate::error::{Error, Result};
use log::debug;

/// Blocking client for a forecasting service reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpForecastService {
    pub url: String,
    client: reqwest::blocking::Client,
}

impl HttpForecastService {
    pub fn new(url: impl Into<String>) -> Self {
        HttpForecastService {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpForecastService {
    fn default() -> Self {
        HttpForecastService::new("http://localhost:8765/")
    }
}

impl ForecastService for HttpForecastService {
    /// POST the case counts and parse the returned table. Error statuses are
    /// reported with the body sent by the service and never retried.
    fn forecast(&self, request: &ForecastRequest) -> Result<Vec<ForecastRow>> {
        debug!(target: "empirical", "POST {} ({} case rows)", self.url, request.cases.len());
        let response = self
            .client
            .post(&self.url)
            .query(&request.query())
            .json(&request.cases)
            .send()
            .map_err(|e| Error::Forecast {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().unwrap_or_default();
            return Err(Error::Forecast { status, message });
        }
        let body = response.text().map_err(|e| Error::Forecast {
            status,
            message: e.to_string(),
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}
