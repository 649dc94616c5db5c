use crate::core::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEGREES, CAMERA_NEAR, CAMERA_START_Z};
use glam::{Mat4, Vec3};
use instant::Instant;

/// Perspective camera with a yaw-only orientation, matching the way the
/// scroll driver dollies and turns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_START_Z),
            yaw: 0.0,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Recompute the aspect ratio for a new viewport. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        let world = Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw);
        world.inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
}

/// Elapsed-time clock sampled once per frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { start }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        FrameTime {
            elapsed: (now - self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
