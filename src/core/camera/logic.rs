use crate::core::camera::components::OrbitControls;
use bevy::math::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.95;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;
// Keeps the camera off the poles so `looking_at` never sees a degenerate up vector.
const POLAR_EPSILON: f32 = 0.01;

pub struct OrbitInput {
    pub drag_delta: Vec2,
    pub wheel_delta: f32,
}

pub struct OrbitUpdate {
    pub translation: Vec3,
    pub zoom: f32,
}

/// Azimuth change in radians for one auto-rotate step.
pub fn auto_rotate_angle(speed: f32, delta_time: f32) -> f32 {
    TAU / 60.0 * speed * delta_time
}

/// Moves the camera around `controls.target` on a sphere.
///
/// `zoom` is the orthographic projection scale; smaller is closer.
pub fn calculate_orbit(
    current_translation: Vec3,
    current_zoom: f32,
    controls: &OrbitControls,
    input: &OrbitInput,
    delta_time: f32,
) -> OrbitUpdate {
    let offset = current_translation - controls.target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return OrbitUpdate {
            translation: current_translation,
            zoom: current_zoom,
        };
    }

    let mut azimuth = offset.x.atan2(offset.z);
    let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

    if controls.auto_rotate {
        azimuth -= auto_rotate_angle(controls.auto_rotate_speed, delta_time);
    }
    if controls.enable_rotate {
        azimuth -= input.drag_delta.x * ROTATE_SENSITIVITY;
        polar -= input.drag_delta.y * ROTATE_SENSITIVITY;
    }
    polar = polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

    let translation = controls.target
        + Vec3::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );

    let mut zoom = current_zoom;
    if controls.enable_zoom && input.wheel_delta.abs() > 0.0 {
        zoom = (zoom * ZOOM_STEP.powf(input.wheel_delta)).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    OrbitUpdate { translation, zoom }
}
