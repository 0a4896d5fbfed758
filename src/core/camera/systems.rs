use crate::core::camera::components::{OrbitControls, StageCamera};
use crate::core::camera::logic::{OrbitInput, calculate_orbit};
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

pub fn orbit_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    mut camera_q: Query<(&mut Transform, &mut Projection, &OrbitControls), With<StageCamera>>,
) {
    // Read ECS state
    let dt = time.delta_secs();

    let mut drag_delta = Vec2::ZERO;
    for ev in mouse_motion.read() {
        drag_delta += ev.delta;
    }
    if !mouse_input.pressed(MouseButton::Left) {
        drag_delta = Vec2::ZERO;
    }

    let mut wheel_delta = 0.0;
    for ev in mouse_wheel.read() {
        wheel_delta += ev.y;
    }

    let Ok((mut transform, mut projection, controls)) = camera_q.single_mut() else {
        return;
    };
    if !controls.enabled {
        return;
    }

    let Projection::Orthographic(ortho) = projection.as_mut() else {
        return;
    };

    let input = OrbitInput {
        drag_delta,
        wheel_delta,
    };

    // Call business logic
    let update = calculate_orbit(transform.translation, ortho.scale, controls, &input, dt);

    // Apply results to ECS
    transform.translation = update.translation;
    transform.look_at(controls.target, Vec3::Y);
    if update.zoom != ortho.scale {
        ortho.scale = update.zoom;
    }
}
