use bevy::color::{Color, Srgba};
use bevy::log::{error, info, warn};
use bevy::math::Vec3;
use bevy::prelude::{Res, Resource};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "weatherscape.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize, Resource)]
#[serde(default)]
pub struct AppConfig {
    pub weather: WeatherConfig,
    pub scene: SceneConfig,
    pub orbit: OrbitConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub location: String,
    pub endpoint: String,
    pub units: String,
    pub api_key_env: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub intro_frames: u32,
    pub ease_divisor: f32,
    pub sweep_turns: f32,
    pub elevation: f32,
    pub initial_offset: [f32; 3],
    pub ambient_color: String,
    pub ambient_brightness: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "London".to_string(),
            endpoint: weather_api::client::DEFAULT_ENDPOINT.to_string(),
            units: weather_api::client::DEFAULT_UNITS.to_string(),
            api_key_env: weather_api::client::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            intro_frames: 100,
            ease_divisor: 120.0,
            sweep_turns: 10.0,
            elevation: 10.0,
            initial_offset: [-90.0, 0.0, 0.0],
            ambient_color: "#cccccc".to_string(),
            ambient_brightness: 1000.0,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_speed: 2.0,
            enable_rotate: false,
            enable_zoom: false,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Weatherscape".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SceneConfig {
    pub fn initial_offset(&self) -> Vec3 {
        Vec3::from_array(self.initial_offset)
    }

    /// Falls back to the default grey when the hex string is invalid.
    pub fn ambient_color(&self) -> Color {
        Srgba::hex(&self.ambient_color)
            .map(Color::Srgba)
            .unwrap_or(Color::srgb_u8(0xcc, 0xcc, 0xcc))
    }
}

/// What happened while loading the config file, reported once logging is up.
#[derive(Debug, Resource)]
pub enum ConfigOrigin {
    File(PathBuf),
    Missing(PathBuf),
    Invalid(ConfigError),
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads `path`, falling back to defaults when it is absent or broken.
    pub fn load_or_default(path: &Path) -> (Self, ConfigOrigin) {
        if !path.exists() {
            return (Self::default(), ConfigOrigin::Missing(path.to_path_buf()));
        }
        match Self::load_from_file(path) {
            Ok(config) => (config, ConfigOrigin::File(path.to_path_buf())),
            Err(err) => (Self::default(), ConfigOrigin::Invalid(err)),
        }
    }
}

pub fn log_config_origin(origin: Res<ConfigOrigin>) {
    match origin.as_ref() {
        ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
        ConfigOrigin::Missing(path) => {
            warn!("No config at {}, using defaults", path.display())
        }
        ConfigOrigin::Invalid(err) => error!("{err}; using defaults"),
    }
}
