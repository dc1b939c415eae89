//! Free-fly camera controller

use crate::core::camera::Camera;
use crate::core::input::InputState;
use winit::keyboard::KeyCode;

/// Fly-style camera controller with WASD movement and mouse look
///
/// Yaw and pitch are kept in degrees. Pitch is clamped to [-89, 89] to
/// avoid gimbal flip; yaw wraps into [0, 360).
pub struct FlyCameraController {
    /// Movement speed in units per second
    pub speed: f32,
    /// Mouse sensitivity in degrees per pixel
    pub sensitivity: f32,
    /// Current yaw (rotation around Y axis) in degrees
    yaw: f32,
    /// Current pitch (rotation around X axis) in degrees
    pitch: f32,
}

impl FlyCameraController {
    /// Create new controller
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Update camera based on input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState, dt: f32) {
        // Mouse look (only when captured)
        if input.is_mouse_captured() {
            let (dx, dy) = input.mouse_delta();
            if dx != 0.0 || dy != 0.0 {
                self.yaw += dx * self.sensitivity;
                self.pitch -= dy * self.sensitivity;

                self.pitch = self.pitch.clamp(-89.0, 89.0);
                self.yaw = self.yaw.rem_euclid(360.0);

                camera.direction = direction_from_angles(self.yaw, self.pitch);
            }
        }

        // Movement
        let mut velocity = glam::Vec3::ZERO;
        let forward = camera.direction;
        let right = camera.right();

        if input.is_key_pressed(KeyCode::KeyW) {
            velocity += forward;
        }
        if input.is_key_pressed(KeyCode::KeyS) {
            velocity -= forward;
        }

        if input.is_key_pressed(KeyCode::KeyA) {
            velocity -= right;
        }
        if input.is_key_pressed(KeyCode::KeyD) {
            velocity += right;
        }

        if input.is_key_pressed(KeyCode::Space) {
            velocity += camera.up;
        }
        if input.is_key_pressed(KeyCode::ShiftLeft) || input.is_key_pressed(KeyCode::ShiftRight) {
            velocity -= camera.up;
        }

        if velocity.length_squared() > 0.0 {
            velocity = velocity.normalize();
            camera.position += velocity * self.speed * dt;
        }
    }

    /// Set initial orientation from angles (in degrees)
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw.rem_euclid(360.0);
        self.pitch = pitch.clamp(-89.0, 89.0);
    }

    /// Get current yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Default for FlyCameraController {
    fn default() -> Self {
        Self::new(4.0, 0.125)
    }
}

/// Spherical-to-Cartesian view direction from yaw/pitch in degrees
fn direction_from_angles(yaw: f32, pitch: f32) -> glam::Vec3 {
    let yaw = yaw.to_radians();
    let pitch = pitch.to_radians();
    glam::Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured_input_with_motion(dx: f64, dy: f64) -> InputState {
        let mut input = InputState::new();
        input.set_mouse_captured(true);
        input.process_mouse_motion((dx, dy));
        input.end_frame();
        input
    }

    #[test]
    fn test_pitch_clamped_at_89() {
        let mut camera = Camera::default();
        let mut controller = FlyCameraController::default();

        // Drag far past the vertical in one frame
        let input = captured_input_with_motion(0.0, -100000.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert_eq!(controller.pitch(), 89.0);

        // And keep dragging: pitch must not exceed the clamp
        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert_eq!(controller.pitch(), 89.0);

        let input = captured_input_with_motion(0.0, 100000.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert_eq!(controller.pitch(), -89.0);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut camera = Camera::default();
        let mut controller = FlyCameraController::default();

        // 0.125 deg/px * 4000 px = 500 degrees -> wraps to 140
        let input = captured_input_with_motion(4000.0, 0.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert!((controller.yaw() - 140.0).abs() < 0.01);

        let input = captured_input_with_motion(-8000.0, 0.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert!(controller.yaw() >= 0.0 && controller.yaw() < 360.0);
    }

    #[test]
    fn test_direction_follows_yaw() {
        let mut camera = Camera::default();
        let mut controller = FlyCameraController::default();
        controller.set_orientation(0.0, 0.0);

        // Tiny nudge so the controller recomputes the direction
        let input = captured_input_with_motion(0.0001, 0.0);
        controller.update(&mut camera, &input, 1.0 / 60.0);

        // Yaw ~0, pitch 0 -> direction ~ +X
        assert!((camera.direction.x - 1.0).abs() < 0.001);
        assert!(camera.direction.y.abs() < 0.001);
    }

    #[test]
    fn test_no_look_when_not_captured() {
        let mut camera = Camera::default();
        let start_dir = camera.direction;
        let mut controller = FlyCameraController::default();

        let mut input = InputState::new();
        input.process_mouse_motion((500.0, 500.0));
        input.end_frame();

        controller.update(&mut camera, &input, 1.0 / 60.0);
        assert_eq!(camera.direction, start_dir);
    }

    #[test]
    fn test_wasd_moves_along_axes() {
        let mut camera = Camera::default();
        let mut controller = FlyCameraController::new(4.0, 0.125);

        let mut input = InputState::new();
        input.press(KeyCode::KeyW);

        controller.update(&mut camera, &input, 0.5);
        // Default camera looks down -Z; W for half a second at speed 4
        assert!((camera.position.z - (-3.0 - 2.0)).abs() < 0.001);

        let mut input = InputState::new();
        input.press(KeyCode::KeyD);
        controller.update(&mut camera, &input, 0.5);
        // Strafing right moves along +X
        assert!((camera.position.x - 2.0).abs() < 0.001);
    }
}
