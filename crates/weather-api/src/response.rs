//! Wire shape of the current-weather response.
//!
//! Only the fields the record needs are modelled; everything else in the
//! body is ignored.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherBody {
    pub main: MainBlock,
    pub weather: Vec<ConditionBlock>,
    pub name: String,
    pub sys: SysBlock,
    pub wind: WindBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f32,
    pub humidity: f32,
    pub pressure: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionBlock {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SysBlock {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindBlock {
    pub speed: f32,
}

/// The API embeds its own status in the body as `cod`. Success is the JSON
/// number 200; error bodies carry a string such as `"404"`.
pub(crate) fn is_success(body: &Value) -> bool {
    body.get("cod").and_then(Value::as_f64) == Some(200.0)
}
