use crate::core::state::AppState;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

/// Dynamic asset key the weather model is registered under.
pub const MODEL_KEY: &str = "weather.model";

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_loading_state(
            LoadingState::new(AppState::LoadingModel)
                .continue_to_state(AppState::Intro)
                .on_failure_continue_to_state(AppState::LoadFailed)
                .load_collection::<ModelAssets>(),
        )
        .add_systems(OnEnter(AppState::LoadFailed), report_load_failure);
    }
}

#[derive(AssetCollection, Resource)]
pub struct ModelAssets {
    // Same string as `MODEL_KEY`; the attribute needs a literal.
    #[asset(key = "weather.model")]
    pub scene: Handle<Scene>,
}

/// Points the model key at the first scene of `model_path`. Must run before
/// the app enters [`AppState::LoadingModel`].
pub fn register_model(dynamic_assets: &mut DynamicAssets, model_path: &str) {
    dynamic_assets.register_asset(
        MODEL_KEY,
        Box::new(StandardDynamicAsset::File {
            path: format!("{model_path}#Scene0"),
        }),
    );
}

fn report_load_failure() {
    error!("Weather model failed to load; press R to try again");
}
