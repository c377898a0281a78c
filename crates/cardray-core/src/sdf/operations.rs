//! SDF Operations - Boolean, extrusion, repetition

use super::Sdf;
use glam::Vec3;

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of two SDFs (combine shapes)
pub struct Union<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf + Send + Sync, B: Sdf + Send + Sync> Sdf for Union<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        self.a.distance(p).min(self.b.distance(p))
    }
}

/// Complement of an SDF (inside becomes outside)
///
/// Inverting a union of boxes carves connected rooms out of infinite solid.
pub struct Invert<S: Sdf> {
    pub inner: S,
}

impl<S: Sdf> Invert<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Sdf + Send + Sync> Sdf for Invert<S> {
    fn distance(&self, p: Vec3) -> f32 {
        -self.inner.distance(p)
    }
}

// ============================================================================
// Extrusion
// ============================================================================

/// Extrudes a planar field (evaluated at `z = 0`) along Z
///
/// The planar distance and `z` are combined with a p-norm, which rounds the
/// edges more sharply as `exponent` grows. Expects a non-negative inner
/// distance, as produced by stroke and arc fields.
pub struct Extrude<S: Sdf> {
    pub inner: S,
    pub thickness: f32,
    pub exponent: i32,
}

impl<S: Sdf> Extrude<S> {
    pub fn new(inner: S, thickness: f32, exponent: i32) -> Self {
        Self {
            inner,
            thickness,
            exponent,
        }
    }
}

impl<S: Sdf + Send + Sync> Sdf for Extrude<S> {
    fn distance(&self, p: Vec3) -> f32 {
        let planar = self.inner.distance(p.with_z(0.0));
        (planar.powi(self.exponent) + p.z.powi(self.exponent)).powf(1.0 / self.exponent as f32)
            - self.thickness
    }
}

// ============================================================================
// Repetition
// ============================================================================

/// Repeats the inner shape along X, mirrored about `x = 0`
///
/// The query uses `|x| mod spacing`, so the inner shape must lie within
/// `[0, spacing)` on X.
pub struct RepeatAbsX<S: Sdf> {
    pub inner: S,
    pub spacing: f32,
}

impl<S: Sdf> RepeatAbsX<S> {
    pub fn new(inner: S, spacing: f32) -> Self {
        Self { inner, spacing }
    }
}

impl<S: Sdf + Send + Sync> Sdf for RepeatAbsX<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p.with_x(p.x.abs() % self.spacing))
    }
}

// ============================================================================
// Tests
// ============================================================================
