//! Image renderer: camera rays, sample averaging and tone mapping
//!
//! Pixels are produced one at a time in a fixed traversal order (rows from
//! the top index down, columns from the right index down) and pushed straight
//! into a [`PixelSink`]. With a seeded generator the byte stream is fully
//! reproducible.

use crate::camera::{Camera, CameraBasis};
use crate::config::{ImageSettings, RenderSettings};
use crate::output::PixelSink;
use crate::scene::{CardScene, SceneField};
use crate::trace::PathTracer;
use crate::{Error, Result};
use glam::Vec3;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Added to the averaged radiance before the Reinhard curve
pub const TONE_BIAS: f32 = 14.0 / 241.0;

/// Map averaged linear radiance to display bytes
///
/// `byte = 255 · c / (c + 1)` with `c = radiance + TONE_BIAS`, clamped to
/// `[0, 255]` and truncated.
pub fn tone_map(radiance: Vec3) -> [u8; 3] {
    let c = radiance + Vec3::splat(TONE_BIAS);
    let mapped = (c / (c + Vec3::ONE) * 255.0).clamp(Vec3::ZERO, Vec3::splat(255.0));
    [mapped.x as u8, mapped.y as u8, mapped.z as u8]
}

/// Pixel coordinates in stream order
pub fn pixel_order(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height)
        .rev()
        .flat_map(move |y| (0..width).rev().map(move |x| (x, y)))
}

/// Summary of a finished render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    /// Pixels written to the sink
    pub pixels: u64,
    pub elapsed: Duration,
}

/// Renders a scene through a camera into a pixel stream
pub struct Renderer<S> {
    tracer: PathTracer<S>,
    camera: Camera,
    basis: CameraBasis,
    image: ImageSettings,
}

impl Renderer<CardScene> {
    /// Build the card scene renderer described by `settings`
    pub fn from_settings(settings: &RenderSettings) -> Result<Self> {
        settings.validate()?;
        let tracer = PathTracer::with_scene(
            CardScene::new(&settings.scene),
            settings.marcher,
            settings.tracer,
        );
        Self::new(tracer, settings.camera.to_camera(), settings.image)
    }
}

impl<S: SceneField> Renderer<S> {
    pub fn new(tracer: PathTracer<S>, camera: Camera, image: ImageSettings) -> Result<Self> {
        if image.height == 0 || image.samples == 0 {
            return Err(Error::InvalidParameter(format!(
                "need non-zero height and samples, got height {} and {} samples",
                image.height, image.samples
            )));
        }
        let basis = camera.basis(image.width)?;
        Ok(Self {
            tracer,
            camera,
            basis,
            image,
        })
    }

    /// Averaged radiance of pixel (`x`, `y`)
    ///
    /// Each sample draws its horizontal then vertical jitter before tracing.
    pub fn sample_pixel<R: Rng>(&self, x: u32, y: u32, rng: &mut R) -> Vec3 {
        let dx = (i64::from(x) - i64::from(self.image.width / 2)) as f32;
        let dy = (i64::from(y) - i64::from(self.image.height / 2)) as f32;

        let mut sum = Vec3::ZERO;
        for _ in 0..self.image.samples {
            let jx = rng.random::<f32>();
            let jy = rng.random::<f32>();
            let direction = self.basis.direction(dx + jx, dy + jy);
            sum += self.tracer.radiance(self.camera.position, direction, rng);
        }
        sum / self.image.samples as f32
    }

    /// Render the full image into `sink`
    pub fn render<P, R>(&self, sink: &mut P, rng: &mut R) -> Result<RenderStats>
    where
        P: PixelSink + ?Sized,
        R: Rng,
    {
        let ImageSettings {
            width,
            height,
            samples,
            ..
        } = self.image;
        info!(width, height, samples, "rendering");
        let start = Instant::now();

        sink.begin(width, height)?;
        let mut pixels = 0u64;
        for (x, y) in pixel_order(width, height) {
            sink.write_pixel(tone_map(self.sample_pixel(x, y, rng)))?;
            pixels += 1;
            if x == 0 {
                debug!(row = y, "row complete");
            }
        }
        sink.finish()?;

        let elapsed = start.elapsed();
        info!(pixels, elapsed_ms = elapsed.as_millis() as u64, "render finished");
        Ok(RenderStats {
            width,
            height,
            samples_per_pixel: samples,
            pixels,
            elapsed,
        })
    }
}
