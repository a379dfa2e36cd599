use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Orbit camera circling a target, with optional auto-rotation and damped
/// drag. Camera motion is view state only; it never feeds back into the reactor.
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth in radians; 0 looks down -Z from +Z.
    pub yaw: f32,
    /// Elevation in radians.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub auto_rotate: bool,
    /// Revolutions are `60 / auto_rotate_speed` seconds long.
    pub auto_rotate_speed: f32,
    pub sensitivity: f32,
    /// Fraction of pending drag applied (and removed) per update.
    pub damping: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: 30.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 50.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            sensitivity: 0.005,
            damping: 0.05,
            min_radius: 5.0,
            max_radius: 100.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }
}

impl OrbitCamera {
    const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.radius
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    /// Queue a drag of `(dx, dy)` pixels; it is applied gradually by `update`.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * self.sensitivity;
        self.pitch_velocity += dy * self.sensitivity;
    }

    /// Dolly in (positive) or out (negative).
    pub fn zoom(&mut self, amount: f32) {
        self.radius = (self.radius * (1.0 - amount * 0.1)).clamp(self.min_radius, self.max_radius);
    }

    /// Angular auto-rotation rate in radians per second.
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.yaw -= self.auto_rotate_rate() * dt;
        }
        self.yaw += self.yaw_velocity * self.damping;
        self.pitch += self.pitch_velocity * self.damping;
        self.yaw_velocity *= 1.0 - self.damping;
        self.pitch_velocity *= 1.0 - self.damping;
        self.pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = OrbitCamera::default();
        assert!((cam.position() - Vec3::new(0.0, 0.0, 30.0)).length() < 1e-5);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn auto_rotate_full_turn_in_two_minutes() {
        let mut cam = OrbitCamera::default();
        for _ in 0..1200 {
            cam.update(0.1);
        }
        assert!((cam.yaw + TAU).abs() < 1e-3);
        assert!((cam.position() - Vec3::new(0.0, 0.0, 30.0)).length() < 0.05);
    }

    #[test]
    fn drag_is_damped_and_settles() {
        let mut cam = OrbitCamera {
            auto_rotate: false,
            ..OrbitCamera::default()
        };
        cam.rotate(100.0, 0.0);
        cam.update(0.016);
        let after_one = cam.yaw;
        for _ in 0..500 {
            cam.update(0.016);
        }
        let settled = cam.yaw;
        cam.update(0.016);
        assert!(after_one.abs() < settled.abs());
        assert!((cam.yaw - settled).abs() < 1e-6);
        // Total travel converges to the full drag.
        assert!((settled + 100.0 * cam.sensitivity).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 1e6);
        for _ in 0..100 {
            cam.update(0.016);
        }
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
    }

    #[test]
    fn zoom_clamps() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.zoom(1.0);
        }
        assert_eq!(cam.radius, cam.min_radius);
        for _ in 0..100 {
            cam.zoom(-1.0);
        }
        assert_eq!(cam.radius, cam.max_radius);
    }
}
