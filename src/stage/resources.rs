use crate::stage::controller::{FrameHandle, FrameScheduler, SceneController};
use bevy::prelude::*;

/// Frame scheduling on top of the ECS loop: a requested frame becomes due
/// on the next `Update`.
#[derive(Debug, Default)]
pub struct FrameClock {
    next: u64,
    due: Option<FrameHandle>,
}

impl FrameClock {
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.due.take()
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.due = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.due == Some(handle) {
            self.due = None;
        }
    }
}

/// The stage currently owned by the app. Kept after dispose so late
/// continuations can see the disposed controller.
#[derive(Resource)]
pub struct ActiveStage {
    pub controller: SceneController,
    pub frames: FrameClock,
    pub root: Entity,
}
