// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use clap::Parser;
use std::path::PathBuf;
use weather_api::Category;
use weatherscape::{AppConfig, DEFAULT_CONFIG_PATH, WeatherQuery, WeatherscapePlugin};

/// Animated diorama of the current weather somewhere.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// City to look up; overrides `weather.location` from the config.
    #[arg(short, long)]
    location: Option<String>,

    /// Show this weather category without calling the API (e.g. `rain`).
    #[arg(short, long)]
    category: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> AppExit {
    let cli = Cli::parse();
    let (config, origin) = AppConfig::load_or_default(&cli.config);

    let query = WeatherQuery {
        location: cli
            .location
            .unwrap_or_else(|| config.weather.location.clone()),
        category_override: cli.category.as_deref().map(Category::from_condition),
    };

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.16, 0.18, 0.22)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window.title.clone(),
                resolution: WindowResolution::new(config.window.width, config.window.height),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        .insert_resource(origin)
        .insert_resource(query)
        .add_plugins(WeatherscapePlugin)
        .run()
}
