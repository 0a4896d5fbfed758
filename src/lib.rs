mod core;
mod loading;
mod stage;
mod ui;
mod weather;

pub use crate::core::config::{AppConfig, ConfigOrigin, DEFAULT_CONFIG_PATH};
pub use crate::weather::resources::WeatherQuery;

use crate::core::camera::CameraPlugin;
use crate::core::config::log_config_origin;
use crate::core::state::AppState;
use crate::loading::LoadingPlugin;
use crate::stage::StagePlugin;
use crate::ui::UIPlugin;
use crate::weather::WeatherPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

/// Expects [`AppConfig`] and [`WeatherQuery`] to be inserted before it runs.
pub struct WeatherscapePlugin;

impl Plugin for WeatherscapePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins((
                LoadingPlugin,
                StagePlugin,
                CameraPlugin,
                WeatherPlugin,
                UIPlugin,
            ))
            .add_systems(
                Startup,
                log_config_origin.run_if(resource_exists::<ConfigOrigin>),
            );

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
