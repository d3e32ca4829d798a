//! Orbit controls: drag to rotate around the target, scroll to dolly.

use crate::camera::CameraRig;
use glam::Vec3;
use std::f32::consts::PI;

/// Keeps the polar angle off the poles so the azimuth stays defined.
const POLE_EPSILON: f32 = 1e-6;
/// Radius factor applied per scroll step.
const DOLLY_STEP: f32 = 0.95;

/// Distance, angle, and damping policy for [`OrbitControls`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitLimits {
    /// No limits and no damping.
    fn default() -> Self {
        OrbitLimits {
            enable_damping: false,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

impl OrbitLimits {
    /// Limits installed when the viewer turns interactive.
    pub fn interactive() -> Self {
        OrbitLimits {
            enable_damping: true,
            damping_factor: 0.04,
            min_distance: 35.0,
            max_distance: 60.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI / 2.5,
        }
    }
}

/// Spherical offset from the target; `phi` is measured from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Spherical {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Spherical {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Pointer-driven orbit around the camera target.
#[derive(Debug)]
pub struct OrbitControls {
    enabled: bool,
    limits: OrbitLimits,
    /// Pending rotation not yet applied to the camera.
    delta_theta: f32,
    delta_phi: f32,
    /// Pending radius factor.
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    /// Disabled controls with no limits.
    pub fn new() -> Self {
        OrbitControls {
            enabled: false,
            limits: OrbitLimits::default(),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_pending();
        }
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    pub fn install_limits(&mut self, limits: OrbitLimits) {
        self.limits = limits;
    }

    /// Queues a drag of `(dx, dy)` surface pixels on a surface `height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        if !self.enabled || height <= 0.0 {
            return;
        }
        self.delta_theta -= 2.0 * PI * dx / height;
        self.delta_phi -= 2.0 * PI * dy / height;
    }

    /// Queues scroll steps; positive steps move towards the target.
    pub fn dolly(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        self.scale *= DOLLY_STEP.powf(steps);
    }

    /// Applies pending input to the camera and decays it when damping is on.
    pub fn update(&mut self, camera: &mut CameraRig) {
        let target = camera.target();
        let mut spherical = Spherical::from_offset(camera.position() - target);
        let limits = self.limits;

        if limits.enable_damping {
            spherical.theta += self.delta_theta * limits.damping_factor;
            spherical.phi += self.delta_phi * limits.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(limits.min_polar_angle, limits.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        spherical.radius =
            (spherical.radius * self.scale).clamp(limits.min_distance, limits.max_distance);

        camera.set_position(target + spherical.to_offset());

        if limits.enable_damping {
            self.delta_theta *= 1.0 - limits.damping_factor;
            self.delta_phi *= 1.0 - limits.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }

    fn clear_pending(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }
}

/// Polar angle of `position` around `target`, measured from +Y.
pub fn polar_angle(position: Vec3, target: Vec3) -> f32 {
    Spherical::from_offset(position - target).phi
}
