//! # Cardray Core
//!
//! A business-card sized path tracer: a fixed scene described entirely by a
//! signed distance function, rendered by sphere tracing with a short Monte
//! Carlo light-transport loop.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cardray_core::prelude::*;
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! let settings = RenderSettings::default();
//! let renderer = Renderer::from_settings(&settings)?;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(settings.image.seed);
//! let mut sink = PpmSink::new(std::io::stdout().lock());
//! renderer.render(&mut sink, &mut rng)?;
//! ```
//!
//! ## Conventions
//!
//! - **Precision**: all field, marching and shading math is `f32`
//! - **Coordinate system**: Y-up; the sun plane sits just below `y = 20`
//! - **Randomness**: every stochastic draw goes through an explicit
//!   [`rand::Rng`] handle, so a seeded generator gives byte-identical images

pub mod camera;
pub mod config;
pub mod march;
pub mod math;
pub mod output;
pub mod render;
pub mod scene;
pub mod sdf;
pub mod trace;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Field building blocks
    pub use crate::sdf::{Sdf, SdfExt, SdfNode, primitives::*};

    // Scene
    pub use crate::scene::{CardScene, SceneField, SceneGeometry, SceneSample, SurfaceKind};

    // Pipeline
    pub use crate::camera::{Camera, CameraBasis};
    pub use crate::march::{MarchConfig, MarchResult, Raymarcher, SurfaceHit};
    pub use crate::render::{RenderStats, Renderer, tone_map};
    pub use crate::trace::{PathTracer, TraceConfig};

    // Output
    pub use crate::output::{OutputFormat, PixelSink, PngSink, PpmSink};

    // Settings
    pub use crate::config::{CameraSettings, DEFAULT_SEED, ImageSettings, RenderSettings};

    // Math (re-export glam)
    pub use glam::{Vec2, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
