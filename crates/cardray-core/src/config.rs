//! Render settings
//!
//! Every tunable constant of a render lives in [`RenderSettings`]. All
//! sections use `#[serde(default)]`, so a settings file only needs the keys it
//! changes:
//!
//! ```json
//! { "image": { "width": 320, "height": 180 }, "tracer": { "bounces": 5 } }
//! ```

use crate::camera::Camera;
use crate::march::MarchConfig;
use crate::scene::SceneGeometry;
use crate::trace::TraceConfig;
use crate::{Error, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 1;

/// Output image and sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
    /// Samples averaged per pixel
    pub samples: u32,
    /// Seed for the random stream
    pub seed: u64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            samples: 16,
            seed: DEFAULT_SEED,
        }
    }
}

/// Camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            eye: camera.position,
            target: camera.target,
        }
    }
}

impl CameraSettings {
    pub fn to_camera(&self) -> Camera {
        Camera::look_at(self.eye, self.target)
    }
}

/// Everything needed to render one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub image: ImageSettings,
    pub camera: CameraSettings,
    pub tracer: TraceConfig,
    pub marcher: MarchConfig,
    pub scene: SceneGeometry,
}

impl RenderSettings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        debug!(path = %path.display(), "loaded render settings");
        Ok(settings)
    }

    /// Parse settings from a JSON string
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize settings as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that would divide by zero or normalize a zero vector
    pub fn validate(&self) -> Result<()> {
        let image = &self.image;
        if image.width == 0 || image.height == 0 {
            return Err(Error::InvalidParameter(format!(
                "image size must be non-zero, got {}x{}",
                image.width, image.height
            )));
        }
        if image.samples == 0 {
            return Err(Error::InvalidParameter("samples per pixel must be non-zero".into()));
        }
        if self.tracer.light_direction.length_squared() <= f32::EPSILON {
            return Err(Error::InvalidParameter("light direction must be non-zero".into()));
        }
        if self.scene.plank_spacing.abs() <= f32::EPSILON {
            return Err(Error::InvalidParameter("plank spacing must be non-zero".into()));
        }
        if self.scene.letter_exponent <= 0 {
            return Err(Error::InvalidParameter(format!(
                "letter exponent must be positive, got {}",
                self.scene.letter_exponent
            )));
        }
        self.camera.to_camera().validate()
    }
}
