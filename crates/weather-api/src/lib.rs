//! Current-weather lookup against the OpenWeatherMap API.
//!
//! One blocking GET per lookup. A body status other than 200 is folded into
//! [`WeatherRecord::not_found`]; transport and parse failures are returned.

pub mod client;
pub mod error;
pub mod record;
mod response;

pub use client::{ClientConfig, WeatherClient, WeatherSource};
pub use error::WeatherError;
pub use record::{Category, WeatherRecord};
