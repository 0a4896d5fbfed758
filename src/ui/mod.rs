pub mod bundles;
pub mod components;

use crate::core::state::AppState;
use crate::weather::resources::{CurrentWeather, WeatherQuery};
use bevy::prelude::*;
use bundles::*;
use components::*;
use weather_api::WeatherRecord;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                update_status.run_if(state_changed::<AppState>),
                update_report.run_if(resource_exists_and_changed::<CurrentWeather>),
            ),
        );
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            PanelBundle::top_left(12.0, Color::srgba(0.0, 0.0, 0.0, 0.45)),
            WeatherHud,
        ))
        .with_children(|parent| {
            parent.spawn((
                LabelBundle::new("", 28.0, Color::WHITE),
                HudLine::Headline,
            ));
            parent.spawn((
                LabelBundle::new("", 16.0, Color::srgb(0.85, 0.85, 0.85)),
                HudLine::Details,
            ));
            parent.spawn((
                LabelBundle::new("", 14.0, Color::srgb(0.6, 0.6, 0.6))
                    .with_margin(UiRect::top(Val::Px(6.0))),
                HudLine::Status,
            ));
        });
}

fn update_status(
    state: Res<State<AppState>>,
    query: Res<WeatherQuery>,
    mut lines: Query<(&HudLine, &mut Text)>,
) {
    let status = status_text(*state.get(), &query.location);
    for (line, mut text) in &mut lines {
        if *line == HudLine::Status {
            text.0 = status.clone();
        }
    }
}

fn update_report(weather: Res<CurrentWeather>, mut lines: Query<(&HudLine, &mut Text)>) {
    let (headline, details) = report_text(&weather.record);
    for (line, mut text) in &mut lines {
        match line {
            HudLine::Headline => text.0 = headline.clone(),
            HudLine::Details => text.0 = details.clone(),
            HudLine::Status => {}
        }
    }
}

pub fn status_text(state: AppState, location: &str) -> String {
    match state {
        AppState::FetchingWeather => format!("Fetching weather for {location}..."),
        AppState::LoadingModel => "Loading scene...".to_string(),
        AppState::Intro | AppState::Interactive => "R to refresh".to_string(),
        AppState::LoadFailed => "Scene failed to load, R to retry".to_string(),
    }
}

pub fn report_text(record: &WeatherRecord) -> (String, String) {
    let headline = format!(
        "{}, {}  {:.0}°C",
        record.location, record.country, record.temperature
    );
    let details = format!(
        "{}\nHumidity {:.0}%  Wind {:.1} m/s  Pressure {:.0} hPa",
        record.description, record.humidity, record.wind_speed, record.pressure
    );
    (headline, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use rstest::rstest;
    use weather_api::Category;

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .insert_resource(WeatherQuery {
                location: "Oslo".to_string(),
                category_override: None,
            })
            .add_plugins(UIPlugin);
        app
    }

    fn line_text(app: &mut App, wanted: HudLine) -> String {
        let mut lines = app.world_mut().query::<(&HudLine, &Text)>();
        lines
            .iter(app.world())
            .find(|(line, _)| **line == wanted)
            .map(|(_, text)| text.0.clone())
            .unwrap()
    }

    #[test]
    fn test_hud_runs_before_weather_arrives() {
        let mut app = hud_app();

        app.update();
        app.update();

        assert_eq!(line_text(&mut app, HudLine::Headline), "");
        assert_eq!(
            line_text(&mut app, HudLine::Status),
            "Fetching weather for Oslo..."
        );
    }

    #[test]
    fn test_hud_shows_report_once_weather_arrives() {
        let mut app = hud_app();
        app.update();

        app.insert_resource(CurrentWeather {
            record: WeatherRecord::not_found(),
        });
        app.update();

        assert_eq!(
            line_text(&mut app, HudLine::Headline),
            "Location not found, --  0°C"
        );
    }

    #[test]
    fn test_report_for_found_location() {
        let record = WeatherRecord {
            temperature: 21.4,
            humidity: 40.0,
            description: "clear sky".to_string(),
            location: "Lisbon".to_string(),
            category: Category::Clear,
            country: "PT".to_string(),
            wind_speed: 3.3,
            pressure: 1015.0,
        };

        let (headline, details) = report_text(&record);

        assert_eq!(headline, "Lisbon, PT  21°C");
        assert_eq!(
            details,
            "clear sky\nHumidity 40%  Wind 3.3 m/s  Pressure 1015 hPa"
        );
    }

    #[test]
    fn test_report_for_sentinel() {
        let (headline, details) = report_text(&WeatherRecord::not_found());

        assert_eq!(headline, "Location not found, --  0°C");
        assert!(details.starts_with("not found\n"));
    }

    #[rstest]
    #[case(AppState::FetchingWeather, "Fetching weather for Oslo...")]
    #[case(AppState::LoadingModel, "Loading scene...")]
    #[case(AppState::Intro, "R to refresh")]
    #[case(AppState::Interactive, "R to refresh")]
    #[case(AppState::LoadFailed, "Scene failed to load, R to retry")]
    fn test_status_text(#[case] state: AppState, #[case] expected: &str) {
        assert_eq!(status_text(state, "Oslo"), expected);
    }
}
