//! Perspective camera.

use glam::{Mat4, Vec3};

/// Perspective projection camera looking from `position` toward `target`.
///
/// `aspect` is owned by the render loop: it is updated whenever the drawing
/// buffer is resized, so the projection always matches the display shape.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height of the output surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Updates the aspect ratio. The next `projection()` call reflects it.
    #[inline]
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(1e-6),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_aspect_changes_projection() {
        let mut cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 5.0);
        let before = cam.projection();

        cam.set_aspect(800.0 / 600.0);
        let after = cam.projection();

        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_ne!(before, after);
    }

    #[test]
    fn projection_is_finite() {
        let cam = PerspectiveCamera::new(40.0, 800.0 / 600.0, 0.1, 1000.0);
        let m = cam.view_projection();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn view_looks_down_negative_z_by_default() {
        let cam = PerspectiveCamera {
            position: Vec3::new(0.0, 0.0, 2.0),
            ..PerspectiveCamera::default()
        };
        // A point in front of the camera lands in front of the view origin.
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!(p.z < 0.0);
    }
}
