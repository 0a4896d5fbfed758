use crate::core::camera::components::{OrbitControls, StageCamera};
use crate::core::config::AppConfig;
use crate::core::state::AppState;
use crate::loading::ModelAssets;
use crate::stage::components::{RenderSurface, StageModel, StageRoot};
use crate::stage::controller::{FrameAction, SceneController, SurfaceSize};
use crate::stage::profile::{CAMERA_FAR, CAMERA_NEAR, OrthoFrame};
use crate::stage::resources::{ActiveStage, FrameClock};
use crate::weather::resources::CurrentWeather;
use bevy::camera::ScalingMode;
use bevy::light::AmbientLight;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

pub fn stage_projection(frame: &OrthoFrame) -> Projection {
    Projection::from(OrthographicProjection {
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        viewport_origin: frame.origin(),
        scaling_mode: ScalingMode::Fixed {
            width: frame.width(),
            height: frame.height(),
        },
        ..OrthographicProjection::default_3d()
    })
}

pub fn mount_stage(
    mut commands: Commands,
    weather: Res<CurrentWeather>,
    config: Res<AppConfig>,
    window_q: Query<&Window, With<PrimaryWindow>>,
) {
    let surface = match window_q.single() {
        Ok(window) => SurfaceSize {
            width: window.width(),
            height: window.height(),
        },
        Err(_) => SurfaceSize {
            width: config.window.width as f32,
            height: config.window.height as f32,
        },
    };

    let mut controller = SceneController::new(&weather.record.category, &config.scene);
    let plan = match controller.mount(surface) {
        Ok(plan) => plan,
        Err(err) => {
            error!("Cannot mount stage: {err}");
            return;
        }
    };

    let controls = OrbitControls {
        auto_rotate: config.orbit.auto_rotate,
        auto_rotate_speed: config.orbit.auto_rotate_speed,
        enable_rotate: config.orbit.enable_rotate,
        enable_zoom: config.orbit.enable_zoom,
        ..OrbitControls::new(plan.target)
    };

    let root = commands
        .spawn((
            StageRoot,
            Name::new("WeatherStage"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|stage| {
            stage.spawn((
                Camera3d::default(),
                stage_projection(&plan.frame),
                Transform::from_translation(plan.camera_position)
                    .looking_at(plan.target, Vec3::Y),
                AmbientLight {
                    color: config.scene.ambient_color(),
                    brightness: config.scene.ambient_brightness,
                    ..default()
                },
                controls,
                StageCamera,
                RenderSurface {
                    width: plan.surface.width,
                    height: plan.surface.height,
                },
                Name::new("StageCamera"),
            ));
        })
        .id();

    info!(
        "Stage mounted for '{}' ({}x{}), loading {}",
        weather.record.category, plan.surface.width, plan.surface.height, plan.model_path
    );

    commands.insert_resource(ActiveStage {
        controller,
        frames: FrameClock::default(),
        root,
    });
}

pub fn start_intro(
    mut commands: Commands,
    models: Option<Res<ModelAssets>>,
    stage: Option<ResMut<ActiveStage>>,
) {
    let Some(stage) = stage else {
        warn!("Model loaded with no stage mounted");
        return;
    };
    let stage = stage.into_inner();
    if !stage.controller.model_loaded(&mut stage.frames) {
        warn!(
            "Model loaded for a stage in phase {:?}, ignoring",
            stage.controller.phase()
        );
        return;
    }

    if let Some(models) = models {
        commands.entity(stage.root).with_children(|root| {
            root.spawn((
                SceneRoot(models.scene.clone()),
                StageModel,
                Name::new("WeatherModel"),
            ));
        });
    }
    info!("Intro sweep started");
}

/// Fires the due frame callback, if any, and applies what the controller
/// decided.
pub fn drive_stage(
    stage: ResMut<ActiveStage>,
    mut camera_q: Query<(&mut Transform, &mut OrbitControls), With<StageCamera>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let stage = stage.into_inner();
    let Some(handle) = stage.frames.take_due() else {
        return;
    };
    let Some(action) = stage.controller.run_frame(handle, &mut stage.frames) else {
        return;
    };
    let Ok((mut transform, mut controls)) = camera_q.single_mut() else {
        return;
    };

    match action {
        FrameAction::PlaceCamera { position, look_at } => {
            *transform = Transform::from_translation(position).looking_at(look_at, Vec3::Y);
        }
        FrameAction::DelegateToOrbit => {
            if !controls.enabled {
                controls.enabled = true;
                info!("Intro sweep finished, orbit controls active");
            }
            if *state.get() == AppState::Intro {
                next_state.set(AppState::Interactive);
            }
        }
    }
}

/// Keeps the render buffer in step with the window. The projection is
/// left at its mount-time framing.
pub fn resize_stage(
    mut resized: MessageReader<WindowResized>,
    mut stage: ResMut<ActiveStage>,
    mut surfaces: Query<&mut RenderSurface>,
) {
    for ev in resized.read() {
        let Some(size) = stage.controller.resize(ev.width, ev.height) else {
            continue;
        };
        for mut surface in &mut surfaces {
            surface.width = size.width;
            surface.height = size.height;
        }
        debug!("Render surface resized to {}x{}", size.width, size.height);
    }
}

pub fn dispose_stage(mut commands: Commands, stage: Option<ResMut<ActiveStage>>) {
    let Some(stage) = stage else {
        return;
    };
    let stage = stage.into_inner();
    if !stage.controller.dispose(&mut stage.frames) {
        return;
    }
    if let Ok(mut root) = commands.get_entity(stage.root) {
        root.despawn();
    }
    info!("Stage disposed");
}

pub fn dispose_on_exit(
    mut exit: MessageReader<AppExit>,
    commands: Commands,
    stage: Option<ResMut<ActiveStage>>,
) {
    if exit.read().count() == 0 {
        return;
    }
    dispose_stage(commands, stage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::controller::Phase;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::state::app::StatesPlugin;
    use weather_api::{Category, WeatherRecord};

    fn record(category: Category) -> WeatherRecord {
        WeatherRecord {
            category,
            ..WeatherRecord::not_found()
        }
    }

    fn test_app(category: Category) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .add_message::<WindowResized>()
            .insert_resource(AppConfig::default())
            .insert_resource(CurrentWeather {
                record: record(category),
            })
            .add_systems(Update, drive_stage.run_if(resource_exists::<ActiveStage>))
            .add_systems(Update, resize_stage.run_if(resource_exists::<ActiveStage>));
        app.world_mut().run_system_once(mount_stage).unwrap();
        app.update();
        app
    }

    fn surfaces(app: &mut App) -> usize {
        app.world_mut()
            .query::<&RenderSurface>()
            .iter(app.world())
            .count()
    }

    fn frames_run(app: &App) -> u64 {
        app.world().resource::<ActiveStage>().controller.frames_run()
    }

    fn start_loop(app: &mut App) {
        app.world_mut().run_system_once(start_intro).unwrap();
        app.update();
    }

    #[test]
    fn test_mount_creates_one_render_surface() {
        let mut app = test_app(Category::Clear);

        assert_eq!(surfaces(&mut app), 1);
        let stage = app.world().resource::<ActiveStage>();
        assert_eq!(stage.controller.phase(), Phase::Initializing);
        let surface = stage.controller.surface().unwrap();
        assert_eq!(surface.width, 1280.0);
        assert_eq!(surface.height, 720.0);
    }

    #[test]
    fn test_no_frames_until_model_loaded() {
        let mut app = test_app(Category::Clear);
        for _ in 0..5 {
            app.update();
        }

        assert_eq!(frames_run(&app), 0);
    }

    #[test]
    fn test_intro_moves_camera_to_sweep_elevation() {
        let mut app = test_app(Category::Rain);
        start_loop(&mut app);
        app.update();

        let transform = app
            .world_mut()
            .query_filtered::<&Transform, With<StageCamera>>()
            .single(app.world())
            .unwrap();
        assert_eq!(transform.translation.y, 10.0);
    }

    #[test]
    fn test_dispose_removes_surface_and_stops_frames() {
        let mut app = test_app(Category::Snow);
        start_loop(&mut app);
        for _ in 0..5 {
            app.update();
        }
        let before = frames_run(&app);
        assert!(before > 0);

        app.world_mut().run_system_once(dispose_stage).unwrap();
        app.update();
        assert_eq!(surfaces(&mut app), 0);

        for _ in 0..5 {
            app.update();
        }
        assert_eq!(frames_run(&app), before);
        assert!(app.world().resource::<ActiveStage>().controller.is_disposed());
    }

    #[test]
    fn test_model_loaded_after_dispose_is_ignored() {
        let mut app = test_app(Category::Clouds);
        app.world_mut().run_system_once(dispose_stage).unwrap();
        app.update();

        start_loop(&mut app);
        for _ in 0..3 {
            app.update();
        }

        assert_eq!(frames_run(&app), 0);
        assert_eq!(surfaces(&mut app), 0);
    }

    #[test]
    fn test_intro_hands_over_to_orbit() {
        let mut app = test_app(Category::Clear);
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Intro);
        start_loop(&mut app);
        for _ in 0..105 {
            app.update();
        }

        let controls = app
            .world_mut()
            .query::<&OrbitControls>()
            .single(app.world())
            .unwrap();
        assert!(controls.enabled);
        assert_eq!(
            app.world().resource::<ActiveStage>().controller.phase(),
            Phase::Interactive
        );
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Interactive
        );
    }

    #[test]
    fn test_resize_updates_surface_but_not_projection() {
        let mut app = test_app(Category::Rain);
        let projection_before = {
            let projection = app
                .world_mut()
                .query_filtered::<&Projection, With<StageCamera>>()
                .single(app.world())
                .unwrap();
            let Projection::Orthographic(ortho) = projection else {
                panic!("stage camera should be orthographic");
            };
            (ortho.scaling_mode, ortho.viewport_origin, ortho.scale)
        };

        let window = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(WindowResized {
            window,
            width: 640.0,
            height: 480.0,
        });
        app.update();

        let (surface, projection) = app
            .world_mut()
            .query_filtered::<(&RenderSurface, &Projection), With<StageCamera>>()
            .single(app.world())
            .unwrap();
        assert_eq!(*surface, RenderSurface { width: 640.0, height: 480.0 });
        let Projection::Orthographic(ortho) = projection else {
            panic!("stage camera should be orthographic");
        };
        let ScalingMode::Fixed { width, height } = ortho.scaling_mode else {
            panic!("stage projection should use a fixed scaling mode");
        };
        let ScalingMode::Fixed {
            width: width_before,
            height: height_before,
        } = projection_before.0
        else {
            unreachable!();
        };
        assert_eq!((width, height), (width_before, height_before));
        assert_eq!(ortho.viewport_origin, projection_before.1);
        assert_eq!(ortho.scale, projection_before.2);
    }
}
