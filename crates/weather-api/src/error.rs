use thiserror::Error;

/// Failures the fetcher does not absorb into the sentinel record.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}
