pub mod resources;
mod systems;

use crate::core::state::AppState;
use crate::stage::systems::dispose_stage;
use crate::weather::resources::*;
use crate::weather::systems::*;
use bevy::prelude::*;

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_weather_provider)
            .add_systems(
                OnEnter(AppState::FetchingWeather),
                (dispose_stage, request_fetch).chain(),
            )
            .add_systems(
                Update,
                (
                    spawn_fetch.run_if(
                        resource_exists::<FetchRequested>.and(resource_exists::<WeatherProvider>),
                    ),
                    poll_fetch.run_if(resource_exists::<PendingWeather>),
                    request_refresh,
                ),
            );
    }
}
