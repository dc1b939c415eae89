//! Free-fly camera for 3D rendering

use crate::core::types::{Vec3, Mat4};

/// Camera with position, view direction, and projection parameters
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// View direction (unit length)
    pub direction: Vec3,
    /// World up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera looking down -Z
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            direction: -Vec3::Z,
            up: Vec3::Y,
            fov_y: fov_y_degrees,
            aspect,
            near: 0.001,
            far: 1000.0,
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get right direction (normalized direction x up)
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize()
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -3.0), 70.0, 800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_vector() {
        let camera = Camera::default();

        // Looking down -Z with +Y up, right is +X
        let right = camera.right();
        assert!((right.x - 1.0).abs() < 0.001);
        assert!(right.y.abs() < 0.001);
        assert!(right.z.abs() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        // View matrix should translate world origin to (-10, 0, 0) in camera space
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(1920.0, 1080.0);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 0.0001);
    }
}
