use bevy::prelude::*;

/// Parent of everything a mounted stage owns; despawning it releases the stage.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct StageRoot;

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct StageModel;

/// Size of the buffer the stage camera renders into, in logical pixels.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct RenderSurface {
    pub width: f32,
    pub height: f32,
}
