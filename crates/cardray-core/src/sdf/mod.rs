//! Signed Distance Functions (SDF) used to model the scene
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! Shapes are combined with a handful of CSG operations: `min` for union,
//! negation for carving, plus the extrusion and repetition the scene needs.
//!
//! ## Example
//!
//! ```rust
//! use cardray_core::sdf::{SdfExt, Sdf, primitives::aligned_box};
//! use glam::Vec3;
//!
//! // A hollow room: the solid is everything outside the box
//! let room = aligned_box(Vec3::splat(-1.0), Vec3::splat(1.0)).invert();
//! assert!(room.distance(Vec3::ZERO) > 0.0);
//! ```

pub mod operations;
pub mod primitives;

use glam::Vec3;

/// The core SDF trait - any type that can compute distance from a point
pub trait Sdf: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    fn distance(&self, p: Vec3) -> f32;
}

/// An SDF node that can be composed and shared
#[derive(Clone)]
pub struct SdfNode {
    inner: std::sync::Arc<dyn Sdf>,
}

impl SdfNode {
    /// Create a new SDF node from any type implementing Sdf
    pub fn new<S: Sdf + 'static>(sdf: S) -> Self {
        Self {
            inner: std::sync::Arc::new(sdf),
        }
    }
}

impl Sdf for SdfNode {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p)
    }
}

/// Extension trait providing chainable operations on SDFs
pub trait SdfExt: Sdf + Sized + 'static {
    /// Union: combine two shapes (OR)
    fn union<S: Sdf + 'static>(self, other: S) -> SdfNode {
        SdfNode::new(operations::Union::new(self, other))
    }

    /// Invert: swap inside and outside, turning a solid into a cavity
    fn invert(self) -> SdfNode {
        SdfNode::new(operations::Invert::new(self))
    }

    /// Extrude a field evaluated in the XY plane along Z
    ///
    /// `exponent` selects the p-norm used to round the edges.
    fn extrude(self, thickness: f32, exponent: i32) -> SdfNode {
        SdfNode::new(operations::Extrude::new(self, thickness, exponent))
    }

    /// Repeat along |x| with the given spacing
    fn repeat_abs_x(self, spacing: f32) -> SdfNode {
        SdfNode::new(operations::RepeatAbsX::new(self, spacing))
    }
}

// Implement SdfExt for all types that implement Sdf
impl<T: Sdf + 'static> SdfExt for T {}

// Re-exports
pub use operations::*;
pub use primitives::*;
