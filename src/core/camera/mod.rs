pub(crate) mod components;
pub(crate) mod logic;
mod systems;

use crate::core::camera::components::*;
use crate::core::camera::systems::*;
use crate::stage::systems::drive_stage;
use bevy::prelude::*;

pub(crate) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StageCamera>()
            .register_type::<OrbitControls>()
            .add_systems(Update, orbit_control.after(drive_stage));
    }
}
