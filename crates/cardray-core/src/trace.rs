//! Monte Carlo light transport
//!
//! Each call to [`PathTracer::radiance`] follows one path for at most
//! `bounces` surface interactions:
//!
//! - **Letter**: perfect mirror, no emission
//! - **Wall**: cosine-weighted diffuse bounce, plus a shadow ray toward the
//!   directional light (next-event estimation) that does not use up a bounce
//! - **Sun**: emits and ends the path
//!
//! Every interaction scales the path throughput by a fixed `damping` factor
//! instead of a physically derived albedo.

use crate::march::{MarchConfig, MarchResult, Raymarcher};
use crate::math::{cosine_hemisphere, reflect};
use crate::scene::{SceneField, SurfaceKind};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Path tracing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Maximum surface interactions per path
    pub bounces: u32,
    /// Throughput multiplier applied at every interaction
    pub damping: f32,
    /// Direction toward the directional light (normalized on use)
    pub light_direction: Vec3,
    /// Radiance of the directional light
    pub light_color: Vec3,
    /// Radiance seen when a path reaches the sun plane
    pub sun_color: Vec3,
    /// Distance new rays start away from the surface they leave
    pub surface_offset: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            bounces: 3,
            damping: 0.2,
            light_direction: Vec3::new(0.6, 0.6, 1.0),
            light_color: Vec3::new(500.0, 400.0, 100.0),
            sun_color: Vec3::new(50.0, 80.0, 100.0),
            surface_offset: 0.1,
        }
    }
}

/// Bounded-depth path tracer
#[derive(Debug, Clone)]
pub struct PathTracer<S> {
    marcher: Raymarcher<S>,
    config: TraceConfig,
    light_direction: Vec3,
}

impl<S: SceneField> PathTracer<S> {
    /// Create a tracer; `config.light_direction` must be non-zero
    pub fn new(marcher: Raymarcher<S>, config: TraceConfig) -> Self {
        Self {
            marcher,
            light_direction: config.light_direction.normalize(),
            config,
        }
    }

    /// Convenience constructor from a scene and both configs
    pub fn with_scene(scene: S, march: MarchConfig, config: TraceConfig) -> Self {
        Self::new(Raymarcher::new(scene, march), config)
    }

    /// One radiance sample along the ray `origin + t * direction`
    ///
    /// Draws two uniform numbers from `rng` per diffuse bounce.
    pub fn radiance<R: Rng>(&self, mut origin: Vec3, mut direction: Vec3, rng: &mut R) -> Vec3 {
        let offset = self.config.surface_offset;
        let mut color = Vec3::ZERO;
        let mut attenuation = Vec3::ONE;

        for _ in 0..self.config.bounces {
            let MarchResult::Hit(hit) = self.marcher.march(origin, direction) else {
                break;
            };

            match hit.kind {
                SurfaceKind::Letter => {
                    direction = reflect(direction, hit.normal);
                    origin = hit.position + direction * offset;
                    attenuation *= self.config.damping;
                }
                SurfaceKind::Wall => {
                    let incidence = hit.normal.dot(self.light_direction);
                    let azimuth = TAU * rng.random::<f32>();
                    let radius = rng.random::<f32>();

                    direction = cosine_hemisphere(hit.normal, azimuth, radius);
                    origin = hit.position + direction * offset;
                    attenuation *= self.config.damping;

                    if incidence > 0.0 {
                        let shadow = self
                            .marcher
                            .march(hit.position + hit.normal * offset, self.light_direction);
                        if shadow.kind() == SurfaceKind::Sun {
                            color += attenuation * self.config.light_color * incidence;
                        }
                    }
                }
                SurfaceKind::Sun => {
                    color += attenuation * self.config.sun_color;
                    break;
                }
                SurfaceKind::None => break,
            }
        }

        color
    }
}
