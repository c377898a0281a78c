//! The scene field: distance plus surface classification
//!
//! The whole "scene database" is one function of a point. Lettering,
//! architecture and the sun plane are separate SDFs; the nearest one wins and
//! decides how the path tracer scatters.

pub mod glyphs;

use crate::sdf::primitives::{AlignedBox, Ceiling, aligned_box, ceiling, half_arc, strokes};
use crate::sdf::{Sdf, SdfExt, SdfNode};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

use glyphs::{ARC_CENTERS, ARC_RADIUS, LETTER_STROKES};

/// What kind of surface a point is nearest to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Nothing was hit (only produced by the marcher)
    None,
    /// Mirror-like lettering
    Letter,
    /// Diffuse room walls, floor and ceiling planks
    Wall,
    /// The emitting sun plane above the ceiling
    Sun,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Letter => "letter",
            Self::Wall => "wall",
            Self::Sun => "sun",
        })
    }
}

/// One evaluation of the scene field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSample {
    /// Signed distance to the nearest surface (negative inside solids)
    pub distance: f32,
    /// Classification of that surface
    pub kind: SurfaceKind,
}

impl SceneSample {
    pub fn new(distance: f32, kind: SurfaceKind) -> Self {
        Self { distance, kind }
    }
}

/// A classified signed distance field that can be marched
pub trait SceneField: Send + Sync {
    /// Distance to and kind of the nearest surface at `p`
    fn sample(&self, p: Vec3) -> SceneSample;
}

/// Numeric constants of the card scene
///
/// Defaults reproduce the classic layout: the word sits on the floor of a
/// 60×18.5×60 room with a raised 50×3×50 alcove overhead whose ceiling is
/// lined with planks; the sun plane hides just under the alcove roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneGeometry {
    /// Half depth of the extruded letters
    pub letter_thickness: f32,
    /// p-norm exponent rounding the letter edges
    pub letter_exponent: i32,
    /// Radius of the P and R bowls
    pub arc_radius: f32,
    /// Main room, carved out of solid
    pub lower_room: AlignedBox,
    /// Ceiling alcove, carved out of solid
    pub upper_room: AlignedBox,
    /// A single ceiling plank, in repeat space
    pub plank: AlignedBox,
    /// Spacing of the ceiling planks along X
    pub plank_spacing: f32,
    /// Everything above this height is the light source
    pub sun_height: f32,
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self {
            letter_thickness: 0.5,
            letter_exponent: 8,
            arc_radius: ARC_RADIUS,
            lower_room: aligned_box(Vec3::new(-30.0, -0.5, -30.0), Vec3::new(30.0, 18.0, 30.0)),
            upper_room: aligned_box(Vec3::new(-25.0, 17.0, -25.0), Vec3::new(25.0, 20.0, 25.0)),
            plank: aligned_box(Vec3::new(1.5, 18.5, -25.0), Vec3::new(6.5, 20.0, 25.0)),
            plank_spacing: 8.0,
            sun_height: 19.9,
        }
    }
}

/// The card scene: lettering, room and sun
#[derive(Clone)]
pub struct CardScene {
    letters: SdfNode,
    architecture: SdfNode,
    sun: Ceiling,
}

impl CardScene {
    /// Build the scene field from its geometric constants
    pub fn new(geometry: &SceneGeometry) -> Self {
        let [left_bowl, right_bowl] =
            ARC_CENTERS.map(|c| half_arc(Vec2::from_array(c), geometry.arc_radius));
        let letters = strokes(&LETTER_STROKES)
            .union(left_bowl)
            .union(right_bowl)
            .extrude(geometry.letter_thickness, geometry.letter_exponent);

        let rooms = geometry.lower_room.union(geometry.upper_room).invert();
        let planks = geometry.plank.repeat_abs_x(geometry.plank_spacing);
        let architecture = rooms.union(planks);

        Self {
            letters,
            architecture,
            sun: ceiling(geometry.sun_height),
        }
    }
}

impl Default for CardScene {
    fn default() -> Self {
        Self::new(&SceneGeometry::default())
    }
}

impl SceneField for CardScene {
    fn sample(&self, p: Vec3) -> SceneSample {
        let mut nearest = SceneSample::new(self.letters.distance(p), SurfaceKind::Letter);

        let room = self.architecture.distance(p);
        if room < nearest.distance {
            nearest = SceneSample::new(room, SurfaceKind::Wall);
        }

        let sun = self.sun.distance(p);
        if sun < nearest.distance {
            nearest = SceneSample::new(sun, SurfaceKind::Sun);
        }

        nearest
    }
}
