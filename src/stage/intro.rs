use crate::core::config::SceneConfig;
use bevy::math::Vec3;
use std::f32::consts::TAU;

/// `sqrt(1 - (x - 1)^4)`: fast start, long settle.
pub fn ease(x: f32) -> f32 {
    (1.0 - (x - 1.0).powi(4)).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepStep {
    Camera(Vec3),
    Done,
}

/// Scripted camera sweep played once after the model appears.
///
/// Each call to [`IntroSweep::step`] is one rendered frame. Frames
/// `1..=frames` place the camera on a circle at a fixed elevation around
/// the target; every later call reports [`SweepStep::Done`].
#[derive(Debug, Clone)]
pub struct IntroSweep {
    frame: u32,
    frames: u32,
    ease_divisor: f32,
    turns: f32,
    elevation: f32,
    start_offset: Vec3,
}

impl IntroSweep {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            frame: 0,
            frames: config.intro_frames,
            ease_divisor: config.ease_divisor,
            turns: config.sweep_turns,
            elevation: config.elevation,
            start_offset: config.initial_offset(),
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_done(&self) -> bool {
        self.frame > self.frames
    }

    pub fn step(&mut self) -> SweepStep {
        if self.frame <= self.frames {
            self.frame += 1;
        }
        if self.is_done() {
            return SweepStep::Done;
        }
        SweepStep::Camera(self.position_at(self.frame))
    }

    pub fn angle_at(&self, frame: u32) -> f32 {
        -ease(frame as f32 / self.ease_divisor) * TAU * self.turns
    }

    pub fn position_at(&self, frame: u32) -> Vec3 {
        let angle = self.angle_at(frame);
        let (sin, cos) = angle.sin_cos();
        let p = self.start_offset;
        Vec3::new(
            p.x * cos + p.z * sin,
            self.elevation,
            p.z * cos - p.x * sin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sweep() -> IntroSweep {
        IntroSweep::new(&SceneConfig::default())
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
    }

    #[test]
    fn test_ease_is_monotonic_on_unit_interval() {
        let mut previous = ease(0.0);
        for i in 1..=1000 {
            let value = ease(i as f32 / 1000.0);
            assert!(value >= previous, "ease dropped at {i}: {value} < {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_sweep_runs_exactly_configured_frames() {
        let mut sweep = sweep();

        let camera_frames = (0..150)
            .map(|_| sweep.step())
            .take_while(|step| matches!(step, SweepStep::Camera(_)))
            .count();

        assert_eq!(camera_frames, 100);
        assert!(sweep.is_done());
    }

    #[test]
    fn test_sweep_stays_done() {
        let mut sweep = sweep();
        for _ in 0..100 {
            sweep.step();
        }

        assert_eq!(sweep.step(), SweepStep::Done);
        assert_eq!(sweep.step(), SweepStep::Done);
        assert_eq!(sweep.frame(), 101);
    }

    #[test]
    fn test_sweep_keeps_elevation_and_radius() {
        let mut sweep = sweep();
        for _ in 0..100 {
            let SweepStep::Camera(position) = sweep.step() else {
                panic!("sweep ended early");
            };
            assert_eq!(position.y, 10.0);
            assert!((Vec3::new(position.x, 0.0, position.z).length() - 90.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_first_frame_position() {
        let sweep = sweep();
        let angle = -ease(1.0 / 120.0) * PI * 20.0;

        let position = sweep.position_at(1);

        assert!((position.x - (-90.0 * angle.cos())).abs() < 1e-3);
        assert!((position.z - (90.0 * angle.sin())).abs() < 1e-3);
    }

    #[test]
    fn test_angle_follows_easing() {
        let sweep = sweep();

        assert_eq!(sweep.angle_at(0), 0.0);
        assert!((sweep.angle_at(120) + PI * 20.0).abs() < 1e-3);
        assert!(sweep.angle_at(100) < sweep.angle_at(50));
    }

    #[test]
    fn test_zero_frame_sweep_is_immediately_done() {
        let mut sweep = IntroSweep::new(&SceneConfig {
            intro_frames: 0,
            ..SceneConfig::default()
        });

        assert_eq!(sweep.step(), SweepStep::Done);
    }
}
