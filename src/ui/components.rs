use bevy::prelude::*;

#[derive(Component)]
pub struct WeatherHud;

/// Which line of the report a text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Status,
    Headline,
    Details,
}
