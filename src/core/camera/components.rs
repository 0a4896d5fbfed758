use bevy::prelude::*;

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct StageCamera;

/// Orbit controls attached to the stage camera. Inert until the intro hands
/// over, after which the camera is only moved through these settings.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub auto_rotate: bool,
    /// `2.0` is one full turn every 30 seconds.
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enabled: false,
            auto_rotate: true,
            auto_rotate_speed: 2.0,
            enable_rotate: false,
            enable_zoom: false,
        }
    }
}
