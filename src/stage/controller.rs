//! Lifecycle of one mounted weather stage.
//!
//! The controller owns no ECS handles. It decides what happens on each
//! frame and the systems in `stage::systems` apply the result. Frame
//! callbacks go through a [`FrameScheduler`] so the loop can be driven and
//! observed without a renderer.

use crate::core::config::SceneConfig;
use crate::stage::intro::{IntroSweep, SweepStep};
use crate::stage::profile::{OrthoFrame, SceneProfile};
use bevy::math::Vec3;
use thiserror::Error;
use weather_api::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    IntroAnimating,
    Interactive,
    Disposed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("stage already mounted (phase {0:?})")]
    AlreadyMounted(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Render buffer dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

/// Everything the ECS side needs to build the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MountPlan {
    pub model_path: String,
    pub target: Vec3,
    pub camera_position: Vec3,
    pub frame: OrthoFrame,
    pub surface: SurfaceSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameAction {
    PlaceCamera { position: Vec3, look_at: Vec3 },
    DelegateToOrbit,
}

pub struct SceneController {
    phase: Phase,
    profile: SceneProfile,
    sweep: IntroSweep,
    start_offset: Vec3,
    surface: Option<SurfaceSize>,
    pending_frame: Option<FrameHandle>,
    frames_run: u64,
}

impl SceneController {
    pub fn new(category: &Category, config: &SceneConfig) -> Self {
        Self {
            phase: Phase::Uninitialized,
            profile: SceneProfile::for_category(category),
            sweep: IntroSweep::new(config),
            start_offset: config.initial_offset(),
            surface: None,
            pending_frame: None,
            frames_run: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Number of frame callbacks that actually ran.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn mount(&mut self, surface: SurfaceSize) -> Result<MountPlan, StageError> {
        if self.phase != Phase::Uninitialized {
            return Err(StageError::AlreadyMounted(self.phase));
        }
        self.phase = Phase::Initializing;
        self.surface = Some(surface);
        Ok(MountPlan {
            model_path: self.profile.model_path.clone(),
            target: self.profile.target,
            camera_position: self.start_offset,
            frame: self.profile.frame(surface.width, surface.height),
            surface,
        })
    }

    /// Starts the intro once the model is in the scene. Returns `false` when
    /// the load finished for a stage that is no longer initializing.
    pub fn model_loaded(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.phase != Phase::Initializing {
            return false;
        }
        self.phase = Phase::IntroAnimating;
        self.pending_frame = Some(scheduler.request_frame());
        true
    }

    /// Runs the frame callback for `handle`. Stale or cancelled handles are
    /// ignored. The next frame is requested before the work is done.
    pub fn run_frame(
        &mut self,
        handle: FrameHandle,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<FrameAction> {
        if self.is_disposed() || self.pending_frame != Some(handle) {
            return None;
        }
        self.pending_frame = Some(scheduler.request_frame());
        self.frames_run += 1;

        match self.phase {
            Phase::IntroAnimating => match self.sweep.step() {
                SweepStep::Camera(position) => Some(FrameAction::PlaceCamera {
                    position,
                    look_at: self.profile.target,
                }),
                SweepStep::Done => {
                    self.phase = Phase::Interactive;
                    Some(FrameAction::DelegateToOrbit)
                }
            },
            Phase::Interactive => Some(FrameAction::DelegateToOrbit),
            Phase::Uninitialized | Phase::Initializing | Phase::Disposed => None,
        }
    }

    /// Matches the render buffer to the container. Camera framing is left
    /// as it was at mount.
    pub fn resize(&mut self, width: f32, height: f32) -> Option<SurfaceSize> {
        if matches!(self.phase, Phase::Uninitialized | Phase::Disposed) {
            return None;
        }
        let size = SurfaceSize { width, height };
        self.surface = Some(size);
        Some(size)
    }

    /// Cancels the pending frame and marks the stage released. Returns
    /// `false` when there was nothing to dispose.
    pub fn dispose(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.is_disposed() {
            return false;
        }
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.surface = None;
        self.phase = Phase::Disposed;
        true
    }
}
