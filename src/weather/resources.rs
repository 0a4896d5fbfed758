use bevy::prelude::*;
use bevy::tasks::Task;
use std::sync::Arc;
use weather_api::{Category, WeatherError, WeatherRecord, WeatherSource};

/// Where records come from. Built once at startup.
#[derive(Resource, Clone)]
pub struct WeatherProvider(pub Arc<dyn WeatherSource>);

/// What to look up, from the command line or config.
#[derive(Resource, Debug, Clone)]
pub struct WeatherQuery {
    pub location: String,
    /// Renders this category without contacting the API.
    pub category_override: Option<Category>,
}

#[derive(Resource, Debug, Clone)]
pub struct CurrentWeather {
    pub record: WeatherRecord,
}

/// Set when a lookup should start on the next frame.
#[derive(Resource, Default)]
pub struct FetchRequested;

#[derive(Resource)]
pub struct PendingWeather(pub Task<Result<WeatherRecord, WeatherError>>);

/// Offline source that always answers with the same category.
pub struct FixedWeather {
    category: Category,
}

impl FixedWeather {
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl WeatherSource for FixedWeather {
    fn fetch(&self, location: &str) -> Result<WeatherRecord, WeatherError> {
        Ok(WeatherRecord {
            temperature: 0.0,
            humidity: 0.0,
            description: format!("{} (offline)", self.category),
            location: location.to_string(),
            category: self.category.clone(),
            country: "--".to_string(),
            wind_speed: 0.0,
            pressure: 0.0,
        })
    }
}
