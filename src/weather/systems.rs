use crate::core::config::AppConfig;
use crate::core::state::AppState;
use crate::loading::register_model;
use crate::stage::profile::model_path;
use crate::weather::resources::*;
use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, block_on, futures_lite::future};
use bevy_asset_loader::prelude::DynamicAssets;
use std::sync::Arc;
use weather_api::{ClientConfig, WeatherClient, WeatherSource};

pub fn init_weather_provider(
    mut commands: Commands,
    config: Res<AppConfig>,
    query: Res<WeatherQuery>,
    existing: Option<Res<WeatherProvider>>,
    mut exit: MessageWriter<AppExit>,
) {
    if existing.is_some() {
        return;
    }

    if let Some(category) = &query.category_override {
        info!("Rendering '{category}' offline, weather API disabled");
        commands.insert_resource(WeatherProvider(Arc::new(FixedWeather::new(category.clone()))));
        return;
    }

    let client = ClientConfig::from_env(&config.weather.api_key_env)
        .map(|client| {
            client
                .with_endpoint(config.weather.endpoint.clone())
                .with_units(config.weather.units.clone())
                .with_timeout(config.weather.timeout())
        })
        .and_then(WeatherClient::new);

    match client {
        Ok(client) => {
            debug!("Weather client ready: {:?}", client.config());
            commands.insert_resource(WeatherProvider(Arc::new(client)));
        }
        Err(err) => {
            error!("Cannot create weather client: {err}");
            exit.write(AppExit::error());
        }
    }
}

pub fn request_fetch(mut commands: Commands) {
    commands.init_resource::<FetchRequested>();
}

pub fn spawn_fetch(
    mut commands: Commands,
    provider: Res<WeatherProvider>,
    query: Res<WeatherQuery>,
) {
    commands.remove_resource::<FetchRequested>();

    let source = provider.0.clone();
    let location = query.location.clone();
    info!("Fetching weather for {location}");

    let task = AsyncComputeTaskPool::get().spawn(async move { source.fetch(&location) });
    commands.insert_resource(PendingWeather(task));
}

pub fn poll_fetch(
    mut commands: Commands,
    mut pending: ResMut<PendingWeather>,
    query: Res<WeatherQuery>,
    mut dynamic_assets: ResMut<DynamicAssets>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(result) = block_on(future::poll_once(&mut pending.0)) else {
        return;
    };
    commands.remove_resource::<PendingWeather>();

    match result {
        Ok(record) => {
            if record.is_not_found() {
                warn!("No weather for '{}', showing the default scene", query.location);
            } else {
                info!(
                    "{}, {}: {} {:.1}°C",
                    record.location, record.country, record.category, record.temperature
                );
            }
            register_model(&mut dynamic_assets, &model_path(&record.category));
            commands.insert_resource(CurrentWeather { record });
            next_state.set(AppState::LoadingModel);
        }
        Err(err) => {
            error!("Weather lookup for '{}' failed: {err}", query.location);
            exit.write(AppExit::error());
        }
    }
}

pub fn request_refresh(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyR) && *state.get() != AppState::FetchingWeather {
        info!("Refreshing weather");
        next_state.set(AppState::FetchingWeather);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UIPlugin;
    use crate::weather::WeatherPlugin;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;
    use weather_api::{Category, WeatherError, WeatherRecord};

    struct BrokenSource;

    impl WeatherSource for BrokenSource {
        fn fetch(&self, _location: &str) -> Result<WeatherRecord, WeatherError> {
            Err(WeatherError::MissingApiKey("WEATHER_API_KEY".to_string()))
        }
    }

    fn test_app(provider: WeatherProvider) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DynamicAssets>()
            .insert_resource(AppConfig::default())
            .insert_resource(WeatherQuery {
                location: "Bergen".to_string(),
                category_override: None,
            })
            .insert_resource(provider)
            .add_plugins(WeatherPlugin);
        app
    }

    fn run_until(app: &mut App, mut done: impl FnMut(&App) -> bool) {
        for _ in 0..200 {
            app.update();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached");
    }

    #[test]
    fn test_fetch_stores_record_and_moves_to_loading() {
        let mut app = test_app(WeatherProvider(Arc::new(FixedWeather::new(Category::Rain))));

        run_until(&mut app, |app| app.world().contains_resource::<CurrentWeather>());
        app.update();

        let record = &app.world().resource::<CurrentWeather>().record;
        assert_eq!(record.category, Category::Rain);
        assert_eq!(record.location, "Bergen");
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::LoadingModel
        );
        assert!(!app.world().contains_resource::<PendingWeather>());
    }

    #[test]
    fn test_fetch_error_exits_with_failure() {
        let mut app = test_app(WeatherProvider(Arc::new(BrokenSource)));

        run_until(&mut app, |app| app.should_exit().is_some());

        assert_eq!(app.should_exit(), Some(AppExit::error()));
        assert!(!app.world().contains_resource::<CurrentWeather>());
    }

    #[test]
    fn test_weather_and_hud_plugins_run_together() {
        let mut app = test_app(WeatherProvider(Arc::new(FixedWeather::new(Category::Clouds))));
        app.add_plugins(UIPlugin);

        run_until(&mut app, |app| {
            *app.world().resource::<State<AppState>>().get() == AppState::LoadingModel
        });
        for _ in 0..5 {
            app.update();
        }

        assert!(app.should_exit().is_none());
        assert_eq!(
            app.world().resource::<CurrentWeather>().record.category,
            Category::Clouds
        );
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::LoadingModel
        );
    }

    #[test]
    fn test_fixed_weather_echoes_location() {
        let record = FixedWeather::new(Category::Snow).fetch("Tromsø").unwrap();

        assert_eq!(record.location, "Tromsø");
        assert_eq!(record.category, Category::Snow);
        assert!(!record.is_not_found());
    }
}
