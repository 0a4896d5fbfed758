use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    FetchingWeather,
    LoadingModel,
    Intro,
    Interactive,
    // The stage stays disposed until a refresh starts a new fetch.
    LoadFailed,
}
