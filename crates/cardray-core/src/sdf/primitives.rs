//! SDF primitive shapes
//!
//! Unlike most SDF libraries these are placed in world space directly: the
//! scene is a fixed card layout, so there are no transforms to apply.

use super::Sdf;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create an axis-aligned box spanning `lower` to `upper`
pub fn aligned_box(lower: Vec3, upper: Vec3) -> AlignedBox {
    AlignedBox::new(lower, upper)
}

/// Create a set of planar strokes from `[x0, y0, x1, y1]` segments
pub fn strokes(segments: &[[f32; 4]]) -> StrokeSet {
    StrokeSet::new(segments.iter().map(|s| Stroke::from_array(*s)).collect())
}

/// Create a half-circle arc open towards -X
pub fn half_arc(center: Vec2, radius: f32) -> HalfArc {
    HalfArc::new(center, radius)
}

/// Create a half-space that is solid above `height`
pub fn ceiling(height: f32) -> Ceiling {
    Ceiling::new(height)
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Axis-aligned box given by two opposite corners
///
/// The distance is the negated offset to the nearest face plane. It is exact
/// inside the box and a lower bound outside it, which is all sphere tracing
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedBox {
    pub lower: Vec3,
    pub upper: Vec3,
}

impl AlignedBox {
    pub fn new(lower: Vec3, upper: Vec3) -> Self {
        Self { lower, upper }
    }
}

impl Sdf for AlignedBox {
    fn distance(&self, p: Vec3) -> f32 {
        -(p - self.lower).min(self.upper - p).min_element()
    }
}

/// A line segment in the XY plane with round caps
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub begin: Vec2,
    pub end: Vec2,
}

impl Stroke {
    pub fn new(begin: Vec2, end: Vec2) -> Self {
        Self { begin, end }
    }

    /// Build from `[x0, y0, x1, y1]`
    pub fn from_array(s: [f32; 4]) -> Self {
        Self::new(Vec2::new(s[0], s[1]), Vec2::new(s[2], s[3]))
    }

    /// Squared distance from `p` to the closest point on the segment
    pub fn distance_squared(&self, p: Vec2) -> f32 {
        let along = self.end - self.begin;
        let t = ((p - self.begin).dot(along) / along.dot(along)).clamp(0.0, 1.0);
        let offset = p - (self.begin + along * t);
        offset.dot(offset)
    }
}

/// Union of strokes, evaluated on the XY projection of the query point
///
/// Squared distances are compared and a single square root is taken at the end.
#[derive(Debug, Clone, Default)]
pub struct StrokeSet {
    pub strokes: Vec<Stroke>,
}

impl StrokeSet {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }
}

impl Sdf for StrokeSet {
    fn distance(&self, p: Vec3) -> f32 {
        let flat = p.truncate();
        self.strokes
            .iter()
            .map(|s| s.distance_squared(flat))
            .fold(f32::MAX, f32::min)
            .sqrt()
    }
}

/// The right half of a circle in the XY plane
///
/// Points right of the centre measure to the circle; points to the left
/// measure to whichever arc endpoint (top or bottom) is nearer.
#[derive(Debug, Clone, Copy)]
pub struct HalfArc {
    pub center: Vec2,
    pub radius: f32,
}

impl HalfArc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Sdf for HalfArc {
    fn distance(&self, p: Vec3) -> f32 {
        let mut o = p.truncate() - self.center;
        if o.x > 0.0 {
            (o.length() - self.radius).abs()
        } else {
            o.y += if o.y > 0.0 { -self.radius } else { self.radius };
            o.length()
        }
    }
}

/// Everything above `height` is solid
#[derive(Debug, Clone, Copy)]
pub struct Ceiling {
    pub height: f32,
}

impl Ceiling {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Sdf for Ceiling {
    fn distance(&self, p: Vec3) -> f32 {
        self.height - p.y
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> AlignedBox {
        aligned_box(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0))
    }

    // ------------------------------------------------------------------------
    // AlignedBox
    // ------------------------------------------------------------------------

    #[test]
    fn box_negative_inside() {
        let b = unit_box();
        assert_relative_eq!(b.distance(Vec3::ZERO), -1.0);
        assert!(b.distance(Vec3::new(0.9, 1.9, 2.9)) < 0.0);
        assert!(b.distance(Vec3::new(-0.5, 0.0, -2.5)) < 0.0);
    }

    #[test]
    fn box_positive_outside() {
        let b = unit_box();
        assert_relative_eq!(b.distance(Vec3::new(3.0, 0.0, 0.0)), 2.0);
        assert!(b.distance(Vec3::new(0.0, -2.5, 0.0)) > 0.0);
        assert!(b.distance(Vec3::new(5.0, 5.0, 5.0)) > 0.0);
    }

    #[test]
    fn box_zero_on_boundary() {
        let b = unit_box();
        assert_relative_eq!(b.distance(Vec3::new(1.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(b.distance(Vec3::new(0.3, -2.0, 1.0)), 0.0);
        assert_relative_eq!(b.distance(Vec3::new(-0.7, 1.5, 3.0)), 0.0);
    }

    // ------------------------------------------------------------------------
    // Strokes
    // ------------------------------------------------------------------------

    #[test]
    fn stroke_projects_onto_interior() {
        let s = Stroke::new(Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_relative_eq!(s.distance_squared(Vec2::new(2.0, 3.0)), 9.0);
    }

    #[test]
    fn stroke_clamps_to_endpoints() {
        let s = Stroke::new(Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_relative_eq!(s.distance_squared(Vec2::new(-3.0, 4.0)), 25.0);
        assert_relative_eq!(s.distance_squared(Vec2::new(7.0, 0.0)), 9.0);
    }

    #[test]
    fn stroke_set_ignores_z_and_takes_nearest() {
        let set = strokes(&[[0.0, 0.0, 0.0, 8.0], [4.0, 0.0, 4.0, 8.0]]);
        assert_relative_eq!(set.distance(Vec3::new(1.0, 4.0, 50.0)), 1.0);
        assert_relative_eq!(set.distance(Vec3::new(3.5, 4.0, -2.0)), 0.5);
    }

    #[test]
    fn empty_stroke_set_is_far_away() {
        let set = StrokeSet::default();
        assert!(set.distance(Vec3::ZERO) > 1e18);
    }

    // ------------------------------------------------------------------------
    // HalfArc
    // ------------------------------------------------------------------------

    #[test]
    fn half_arc_measures_ring_on_open_side() {
        let arc = half_arc(Vec2::new(-11.0, 6.0), 2.0);
        assert_relative_eq!(arc.distance(Vec3::new(-8.0, 6.0, 0.0)), 1.0);
        assert_relative_eq!(arc.distance(Vec3::new(-11.0 + 0.5, 6.0, 0.0)), 1.5);
    }

    #[test]
    fn half_arc_measures_endpoints_on_closed_side() {
        let arc = half_arc(Vec2::new(11.0, 6.0), 2.0);
        // Left of the centre, above: nearest is the top endpoint (11, 8)
        assert_relative_eq!(arc.distance(Vec3::new(8.0, 8.0, 0.0)), 3.0);
        // Left of the centre, below: nearest is the bottom endpoint (11, 4)
        assert_relative_eq!(arc.distance(Vec3::new(11.0, 0.0, 0.0)), 4.0);
    }

    // ------------------------------------------------------------------------
    // Ceiling
    // ------------------------------------------------------------------------

    #[test]
    fn ceiling_is_solid_above_height() {
        let c = ceiling(19.9);
        assert!(c.distance(Vec3::new(0.0, 5.0, 0.0)) > 0.0);
        assert!(c.distance(Vec3::new(0.0, 25.0, 0.0)) < 0.0);
    }
}
