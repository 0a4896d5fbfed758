use std::time::Duration;

use tracing::debug;

use crate::{WeatherError, WeatherRecord};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Anything that can produce a record for a location.
pub trait WeatherSource: Send + Sync {
    fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError>;
}

#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub units: String,
    pub api_key: String,
    /// `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("units", &self.units)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            units: DEFAULT_UNITS.to_string(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Reads the credential from the named environment variable.
    pub fn from_env(var: &str) -> Result<Self, WeatherError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(WeatherError::MissingApiKey(var.to_string())),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking client for the current-weather endpoint. One request per
/// [`WeatherSource::fetch`], no retries.
pub struct WeatherClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl WeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl WeatherSource for WeatherClient {
    fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError> {
        debug!(location = %location, endpoint = %self.config.endpoint, "Weather request");

        let body = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("q", location),
                ("units", self.config.units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()?
            .text()?;

        let record = WeatherRecord::from_body(&body)?;
        debug!(
            location = %record.location,
            category = %record.category,
            found = !record.is_not_found(),
            "Weather response normalized"
        );
        Ok(record)
    }
}
