//! Pinhole camera for the renderer

use crate::{Error, Result};
use glam::Vec3;

/// A camera looking from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(-22.0, 5.0, 25.0),
            target: Vec3::new(-3.0, 4.0, 0.0),
        }
    }
}

/// Per-pixel ray basis derived from a [`Camera`] and an image width
///
/// `left` and `up` are scaled to one pixel, so a pixel offset maps straight
/// to a direction offset. The horizontal field of view is therefore fixed at
/// about 53 degrees whatever the resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub left: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Create a camera looking at a target from a position
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Get the forward direction (normalized)
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Get distance from camera to target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Check that a basis can be built from this camera
    ///
    /// Rejects coincident position and target, and views straight up or down
    /// (the horizontal axis is derived from the view direction's XZ part).
    pub fn validate(&self) -> Result<()> {
        if self.distance() <= f32::EPSILON {
            return Err(Error::InvalidParameter(format!(
                "camera position {} coincides with target",
                self.position
            )));
        }
        let forward = self.forward();
        if Vec3::new(forward.z, 0.0, -forward.x).length_squared() <= f32::EPSILON {
            return Err(Error::InvalidParameter(format!(
                "camera looks straight along the vertical axis ({} -> {})",
                self.position, self.target
            )));
        }
        Ok(())
    }

    /// Build the ray basis for an image `width` pixels across
    pub fn basis(&self, width: u32) -> Result<CameraBasis> {
        self.validate()?;
        if width == 0 {
            return Err(Error::InvalidParameter("image width must be non-zero".into()));
        }

        let forward = self.forward();
        let left = Vec3::new(forward.z, 0.0, -forward.x).normalize() * (1.0 / width as f32);
        let up = forward.cross(left);
        Ok(CameraBasis { forward, left, up })
    }
}

impl CameraBasis {
    /// Direction through the pixel-space offset (`dx`, `dy`) from the image centre
    pub fn direction(&self, dx: f32, dy: f32) -> Vec3 {
        (self.forward + self.left * dx + self.up * dy).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn basis_is_orthogonal_and_pixel_scaled() {
        let b = Camera::default().basis(960).unwrap_or_else(|e| panic!("{e}"));

        assert_relative_eq!(b.forward.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(b.left.length(), 1.0 / 960.0, epsilon = 1e-8);
        assert_relative_eq!(b.up.length(), 1.0 / 960.0, epsilon = 1e-7);
        assert_relative_eq!(b.forward.dot(b.left), 0.0, epsilon = 1e-7);
        assert_relative_eq!(b.forward.dot(b.up), 0.0, epsilon = 1e-7);
        assert_relative_eq!(b.left.dot(b.up), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn left_is_horizontal_and_up_points_up() {
        let b = Camera::default().basis(100).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(b.left.y, 0.0);
        assert!(b.up.y > 0.0);
    }

    #[test]
    fn centre_pixel_looks_at_target() {
        let camera = Camera::default();
        let b = camera.basis(640).unwrap_or_else(|e| panic!("{e}"));
        let d = b.direction(0.0, 0.0);
        assert_relative_eq!(d.dot(camera.forward()), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_coincident_target() {
        let camera = Camera::look_at(Vec3::ONE, Vec3::ONE);
        assert!(matches!(camera.basis(10), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_vertical_view() {
        let camera = Camera::look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!(matches!(camera.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_zero_width() {
        assert!(Camera::default().basis(0).is_err());
    }
}
