//! Sphere tracing against a [`SceneField`]
//!
//! The marcher steps along a ray by the field's distance until it gets within
//! `hit_epsilon` of a surface. Two hard caps keep degenerate geometry from
//! looping forever: a maximum travel distance (reported as a miss) and a
//! maximum number of non-converging steps (reported as a hit on whatever the
//! ray is currently nearest to).

use crate::scene::{SceneField, SurfaceKind};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Raymarch configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// Distance threshold for a surface hit
    pub hit_epsilon: f32,
    /// Rays that travel this far without a hit miss
    pub max_distance: f32,
    /// Steps without converging before the ray gives up and reports a hit
    pub max_stalled_steps: u32,
    /// Finite-difference step for normal estimation
    pub normal_epsilon: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            hit_epsilon: 0.01,
            max_distance: 100.0,
            max_stalled_steps: 99,
            normal_epsilon: 0.01,
        }
    }
}

/// Where and what a ray hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Classification of the surface
    pub kind: SurfaceKind,
    /// Point where marching stopped
    pub position: Vec3,
    /// Estimated unit surface normal (zero where the field is flat)
    pub normal: Vec3,
    /// Distance travelled along the ray
    pub traveled: f32,
}

/// Raymarch result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarchResult {
    /// The ray left the marching range
    Miss,
    /// The ray reached a surface
    Hit(SurfaceHit),
}

impl MarchResult {
    /// Surface classification, [`SurfaceKind::None`] on a miss
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Self::Miss => SurfaceKind::None,
            Self::Hit(hit) => hit.kind,
        }
    }

    /// The hit, if any
    pub fn hit(&self) -> Option<&SurfaceHit> {
        match self {
            Self::Miss => None,
            Self::Hit(hit) => Some(hit),
        }
    }
}

/// Sphere tracer over a scene field
#[derive(Debug, Clone)]
pub struct Raymarcher<S> {
    scene: S,
    config: MarchConfig,
}

impl<S: SceneField> Raymarcher<S> {
    pub fn new(scene: S, config: MarchConfig) -> Self {
        Self { scene, config }
    }

    /// March from `origin` along the unit vector `direction`
    pub fn march(&self, origin: Vec3, direction: Vec3) -> MarchResult {
        let mut traveled = 0.0;
        let mut stalled = 0;

        while traveled < self.config.max_distance {
            let position = origin + direction * traveled;
            let sample = self.scene.sample(position);

            let converged = sample.distance < self.config.hit_epsilon;
            if !converged {
                stalled += 1;
            }
            if converged || stalled > self.config.max_stalled_steps {
                if !converged {
                    trace!(?position, distance = sample.distance, "march stalled");
                }
                return MarchResult::Hit(SurfaceHit {
                    kind: sample.kind,
                    position,
                    normal: self.normal_at(position, sample.distance),
                    traveled,
                });
            }

            traveled += sample.distance;
        }

        MarchResult::Miss
    }

    /// Forward-difference gradient of the field at `position`
    ///
    /// `distance` is the field value already sampled at `position`.
    pub fn normal_at(&self, position: Vec3, distance: f32) -> Vec3 {
        let e = self.config.normal_epsilon;
        let probe = |offset: Vec3| self.scene.sample(position + offset).distance - distance;
        Vec3::new(
            probe(Vec3::new(e, 0.0, 0.0)),
            probe(Vec3::new(0.0, e, 0.0)),
            probe(Vec3::new(0.0, 0.0, e)),
        )
        .normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CardScene, SceneSample};
    use approx::assert_relative_eq;

    /// Floor at y = 0, nothing else
    struct Floor;

    impl SceneField for Floor {
        fn sample(&self, p: Vec3) -> SceneSample {
            SceneSample::new(p.y, SurfaceKind::Wall)
        }
    }

    /// A field that never lets the ray converge nor advance far
    struct Treacle;

    impl SceneField for Treacle {
        fn sample(&self, _p: Vec3) -> SceneSample {
            SceneSample::new(0.05, SurfaceKind::Letter)
        }
    }

    #[test]
    fn hits_floor_straight_down() {
        let marcher = Raymarcher::new(Floor, MarchConfig::default());
        let result = marcher.march(Vec3::new(1.0, 3.0, -2.0), -Vec3::Y);

        let hit = result.hit().copied().unwrap_or_else(|| panic!("expected hit"));
        assert_eq!(hit.kind, SurfaceKind::Wall);
        assert_relative_eq!(hit.traveled, 3.0, epsilon = 0.01);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn misses_when_leaving_range() {
        let marcher = Raymarcher::new(Floor, MarchConfig::default());
        let result = marcher.march(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(result, MarchResult::Miss);
        assert_eq!(result.kind(), SurfaceKind::None);
    }

    #[test]
    fn stall_cap_reports_hit() {
        let config = MarchConfig::default();
        let marcher = Raymarcher::new(Treacle, config);
        let result = marcher.march(Vec3::ZERO, Vec3::X);

        let hit = result.hit().copied().unwrap_or_else(|| panic!("expected stalled hit"));
        assert_eq!(hit.kind, SurfaceKind::Letter);
        // 99 advances of 0.05 before the 100th sample gives up
        assert_relative_eq!(hit.traveled, 0.05 * config.max_stalled_steps as f32, epsilon = 1e-3);
    }

    #[test]
    fn flat_field_gives_zero_normal() {
        let marcher = Raymarcher::new(Treacle, MarchConfig::default());
        assert_eq!(marcher.normal_at(Vec3::ZERO, 0.05), Vec3::ZERO);
    }

    #[test]
    fn hits_room_wall_at_analytic_distance() {
        let marcher = Raymarcher::new(CardScene::default(), MarchConfig::default());
        // From open air towards the +X wall of the room at x = 30
        let result = marcher.march(Vec3::new(0.0, 5.0, 10.0), Vec3::X);

        let hit = result.hit().copied().unwrap_or_else(|| panic!("expected hit"));
        assert_eq!(hit.kind, SurfaceKind::Wall);
        assert!((hit.traveled - 30.0).abs() <= MarchConfig::default().hit_epsilon);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-3);
    }

    #[test]
    fn hits_letter_head_on() {
        let marcher = Raymarcher::new(CardScene::default(), MarchConfig::default());
        // Straight at the stem of the I from in front of the card
        let result = marcher.march(Vec3::new(-6.0, 4.0, 10.0), -Vec3::Z);

        let hit = result.hit().copied().unwrap_or_else(|| panic!("expected hit"));
        assert_eq!(hit.kind, SurfaceKind::Letter);
        assert_relative_eq!(hit.traveled, 9.5, epsilon = 0.02);
        assert!(hit.normal.z > 0.9);
    }
}
