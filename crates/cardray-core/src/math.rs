//! Vector algebra shared by the field, the marcher and the tracer
//!
//! Points, directions and colours are all [`glam::Vec3`]:
//!
//! - `a + b` adds component-wise
//! - `a * b` multiplies component-wise (colours, attenuation); `a * s` scales
//! - `a.dot(b)` is the usual inner product
//! - `a.normalize()` is `a * (1 / sqrt(a.dot(a)))`
//!
//! Normalizing a zero vector yields non-finite components. That is a caller
//! precondition, not an error: the only inputs that could be zero are
//! rejected by settings validation, and the marcher's gradient goes through
//! `normalize_or_zero`.

use glam::Vec3;

/// Mirror `direction` about the plane with unit normal `normal`.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - normal * (2.0 * normal.dot(direction))
}

/// Two tangents completing `normal` to an orthonormal frame.
///
/// Branches on the sign of `normal.z` so the frame stays well defined at both
/// poles. `normal` must be unit length.
#[inline]
pub fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let sign = if normal.z < 0.0 { -1.0 } else { 1.0 };
    let a = -1.0 / (sign + normal.z);
    let b = normal.x * normal.y * a;

    let tangent = Vec3::new(b, sign + normal.y * normal.y * a, -normal.y);
    let bitangent = Vec3::new(1.0 + sign * normal.x * normal.x * a, sign * b, -sign * normal.x);
    (tangent, bitangent)
}

/// Cosine-weighted direction in the hemisphere around `normal`.
///
/// `azimuth` is in radians, `radius` in `[0, 1)` selects the elevation.
#[inline]
pub fn cosine_hemisphere(normal: Vec3, azimuth: f32, radius: f32) -> Vec3 {
    let (tangent, bitangent) = tangent_frame(normal);
    let spread = (1.0 - radius).sqrt();
    tangent * (azimuth.cos() * spread)
        + bitangent * (azimuth.sin() * spread)
        + normal * radius.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLES: [Vec3; 6] = [
        Vec3::new(0.6, 0.6, 1.0),
        Vec3::new(-3.0, 4.0, 0.5),
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::new(1e-3, -7.0, 2.0),
        Vec3::new(19.0, 0.0, -25.0),
        Vec3::new(-0.2, -0.1, -0.3),
    ];

    #[test]
    fn normalize_gives_unit_length() {
        for v in SAMPLES {
            assert_relative_eq!(v.normalize().length(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn dot_is_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(a.dot(b), b.dot(a));
            }
        }
    }

    #[test]
    fn scale_is_componentwise() {
        let v = Vec3::new(1.0, 2.0, 3.0) * Vec3::new(4.0, 0.5, -1.0);
        assert_eq!(v, Vec3::new(4.0, 1.0, -3.0));
        assert_eq!(Vec3::new(1.0, 2.0, 3.0) * Vec3::splat(0.2), Vec3::new(1.0, 2.0, 3.0) * 0.2);
    }

    #[test]
    fn reflect_flips_normal_component() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_relative_eq!(r.x, 1.0);
        assert_relative_eq!(r.y, 1.0);
        assert_relative_eq!(r.z, 0.0);
    }

    #[test]
    fn tangent_frame_is_orthonormal() {
        for v in SAMPLES.iter().copied().chain([Vec3::Z, -Vec3::Z, Vec3::X]) {
            let n = v.normalize();
            let (t, b) = tangent_frame(n);
            assert_relative_eq!(t.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(b.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(t.dot(n), 0.0, epsilon = 1e-5);
            assert_relative_eq!(b.dot(n), 0.0, epsilon = 1e-5);
            assert_relative_eq!(t.dot(b), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn cosine_hemisphere_stays_above_surface() {
        for v in SAMPLES {
            let n = v.normalize();
            for i in 0..16 {
                let azimuth = i as f32 * 0.4;
                let radius = i as f32 / 16.0;
                let d = cosine_hemisphere(n, azimuth, radius);
                assert_relative_eq!(d.length(), 1.0, epsilon = 1e-4);
                assert!(d.dot(n) >= -1e-6);
            }
        }
    }
}
