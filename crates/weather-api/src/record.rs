use std::fmt;

use serde::de::Error as _;
use serde_json::Value;

use crate::WeatherError;
use crate::response::{CurrentWeatherBody, is_success};

pub const NOT_FOUND_LOCATION: &str = "Location not found";
pub const NOT_FOUND_COUNTRY: &str = "--";
pub const NOT_FOUND_DESCRIPTION: &str = "not found";

/// Normalized primary weather condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Clear,
    Clouds,
    Rain,
    Snow,
    Mist,
    /// Any condition without a dedicated scene, e.g. `thunderstorm`.
    Other(String),
}

impl Category {
    /// Parses a condition name case-insensitively.
    pub fn from_condition(condition: &str) -> Self {
        let lowered = condition.to_lowercase();
        match lowered.as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            _ => Self::Other(lowered),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Mist => "mist",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one location, in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub temperature: f32,
    pub humidity: f32,
    pub description: String,
    pub location: String,
    pub category: Category,
    pub country: String,
    pub wind_speed: f32,
    pub pressure: f32,
}

impl WeatherRecord {
    /// Placeholder returned when the API reports anything but success.
    pub fn not_found() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            description: NOT_FOUND_DESCRIPTION.to_string(),
            location: NOT_FOUND_LOCATION.to_string(),
            category: Category::Clear,
            country: NOT_FOUND_COUNTRY.to_string(),
            wind_speed: 0.0,
            pressure: 0.0,
        }
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::not_found()
    }

    /// Normalizes a raw response body.
    ///
    /// A non-200 `cod` yields [`WeatherRecord::not_found`]. A body that is not
    /// JSON, or a success body missing required fields, is an error.
    pub fn from_body(body: &str) -> Result<Self, WeatherError> {
        let value: Value = serde_json::from_str(body)?;
        if !is_success(&value) {
            return Ok(Self::not_found());
        }

        let body: CurrentWeatherBody = serde_json::from_value(value)?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| serde_json::Error::custom("response has an empty `weather` list"))?;

        Ok(Self {
            temperature: body.main.temp,
            humidity: body.main.humidity,
            description: condition.description,
            location: body.name,
            category: Category::from_condition(&condition.main),
            country: body.sys.country,
            wind_speed: body.wind.speed,
            pressure: body.main.pressure,
        })
    }
}
