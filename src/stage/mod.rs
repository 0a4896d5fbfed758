pub mod components;
pub mod controller;
pub mod intro;
pub mod profile;
pub mod resources;
pub mod systems;

use crate::core::state::AppState;
use crate::stage::components::*;
use crate::stage::resources::ActiveStage;
use crate::stage::systems::*;
use bevy::prelude::*;

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StageRoot>()
            .register_type::<StageModel>()
            .register_type::<RenderSurface>()
            .add_systems(OnEnter(AppState::LoadingModel), mount_stage)
            .add_systems(OnEnter(AppState::Intro), start_intro)
            .add_systems(OnEnter(AppState::LoadFailed), dispose_stage)
            .add_systems(
                Update,
                (drive_stage, resize_stage).run_if(resource_exists::<ActiveStage>),
            )
            .add_systems(Last, dispose_on_exit);
    }
}
