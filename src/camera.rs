//! Perspective camera that always looks at a fixed target.

use glam::{Mat4, Vec3};

/// Who currently drives the camera position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Position is written by the intro animation; orbit input is ignored.
    Scripted,
    /// Position is written by orbit controls.
    Interactive,
}

/// Camera position, projection, and control mode.
#[derive(Clone, Debug)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Width / height of the display surface.
    aspect: f32,
    near: f32,
    far: f32,
    mode: CameraMode,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CameraRig {
    /// Camera parked at its pre-intro position.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(34.0, 16.0, -20.0),
            target: Vec3::ZERO,
            fov_y: 35.0_f32.to_radians(),
            aspect,
            near: 1.0,
            far: 100.0,
            mode: CameraMode::Scripted,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    /// Distance from the camera to its target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
