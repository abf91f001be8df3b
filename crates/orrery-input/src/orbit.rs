//! Orbit controller: yaw/pitch/distance around the world origin.

use glam::{Quat, Vec3};

use orrery_render::Camera;

use crate::mouse::MouseState;

/// Spherical-coordinate camera rig centred on the origin.
///
/// Left-drag rotates the viewpoint, the scroll wheel dollies in and out.
/// The pitch is clamped just short of the poles so the view never flips.
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Rotation around the world Y axis, radians.
    pub yaw: f32,
    /// Elevation above the orbital plane, radians.
    pub pitch: f32,
    /// Distance from the origin, world units.
    pub distance: f32,
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Distance change per scroll row.
    pub zoom_step: f32,
    /// Closest the camera may dolly in.
    pub min_distance: f32,
    /// Farthest the camera may dolly out.
    pub max_distance: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.55,
            distance: 12.0,
            drag_sensitivity: 0.005,
            zoom_step: 1.0,
            min_distance: 1.0,
            max_distance: 60.0,
        }
    }
}

impl OrbitController {
    const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    /// Consume this frame's mouse transients: drags rotate, scroll zooms.
    pub fn update(&mut self, mouse: &MouseState) {
        if mouse.dragging() {
            let delta = mouse.delta();
            self.yaw -= delta.x * self.drag_sensitivity;
            self.pitch += delta.y * self.drag_sensitivity;
            self.pitch = self.pitch.clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
            if delta.length_squared() > 0.0 {
                tracing::trace!(yaw = self.yaw, pitch = self.pitch, "orbit drag");
            }
        }

        let scroll = mouse.scroll();
        if scroll != 0.0 {
            self.distance = (self.distance - scroll * self.zoom_step)
                .clamp(self.min_distance, self.max_distance);
        }
    }

    /// The camera orientation as a unit quaternion (yaw then pitch).
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.pitch)
    }

    /// World-space camera position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        // The camera sits `distance` behind the origin along its own
        // forward axis, so that it always looks at the origin.
        self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Build the camera for this pose at the given aspect ratio.
    pub fn camera(&self, aspect_ratio: f32) -> Camera {
        Camera {
            position: self.position(),
            rotation: self.rotation(),
            aspect_ratio,
            ..Camera::default()
        }
    }
}
