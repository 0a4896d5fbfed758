use bevy::math::{Vec2, Vec3};
use weather_api::Category;

pub const SCALE_SLOPE: f32 = 0.001;
pub const MODEL_DIR: &str = "models3d";

const TARGET_CENTERED: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const TARGET_FORWARD: Vec3 = Vec3::new(0.0, 1.0, 2.0);

const FRUSTUM_TOP: f32 = 1.25;
const FRUSTUM_BOTTOM: f32 = 1.45;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 50_000.0;

/// Per-category camera framing and model.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneProfile {
    pub model_path: String,
    pub target: Vec3,
    pub scale_intercept: f32,
}

impl SceneProfile {
    pub fn for_category(category: &Category) -> Self {
        let (target, scale_intercept) = match category {
            Category::Clear => (TARGET_CENTERED, 2.6),
            Category::Clouds => (TARGET_FORWARD, 2.8),
            Category::Rain => (TARGET_FORWARD, 3.4),
            Category::Snow => (TARGET_FORWARD, 3.4),
            // Mist borrows the clouds model but keeps the default framing.
            Category::Mist | Category::Other(_) => (TARGET_CENTERED, 2.3),
        };
        Self {
            model_path: model_path(category),
            target,
            scale_intercept,
        }
    }

    /// Camera scale for a container `height` in logical pixels.
    pub fn scale(&self, height: f32) -> f32 {
        height * SCALE_SLOPE + self.scale_intercept
    }

    pub fn frame(&self, width: f32, height: f32) -> OrthoFrame {
        OrthoFrame::new(self.scale(height), width / height.max(1.0))
    }
}

/// Path of the model for `category` inside the asset directory.
pub fn model_path(category: &Category) -> String {
    let name = match category {
        Category::Mist => "clouds",
        other => other.as_str(),
    };
    format!("{MODEL_DIR}/{name}.glb")
}

/// Asymmetric orthographic frustum, taller below the target than above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrame {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OrthoFrame {
    pub fn new(scale: f32, aspect: f32) -> Self {
        Self {
            left: -scale * aspect,
            right: scale * aspect,
            top: scale * FRUSTUM_TOP,
            bottom: -scale * FRUSTUM_BOTTOM,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Where the camera axis sits inside the frame, as fractions from the
    /// bottom-left corner.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(-self.left / self.width(), -self.bottom / self.height())
    }
}
