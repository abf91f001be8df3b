//! Camera producing the view-projection matrix uniform.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Uniform buffer contents for the shared camera bind group.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4], // 64 bytes, mat4x4
}

/// A perspective camera with reverse-Z projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
}

impl Camera {
    /// Compute the view matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Mat4::from_quat(self.rotation);
        let translation = Mat4::from_translation(self.position);
        (translation * rotation).inverse()
    }

    /// Compute the reverse-Z perspective projection: near and far are
    /// swapped so the near plane maps to depth 1 and the far plane to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Convert to the uniform uploaded to the GPU.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_camera_uniform_is_64_bytes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn test_view_matrix_inverse_recovers_position() {
        let camera = Camera {
            position: Vec3::new(3.0, 4.0, 5.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..Camera::default()
        };
        let reconstructed = camera.view_matrix().inverse().col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_reverse_z_maps_near_plane_to_one() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();
        let on_near = proj * glam::Vec4::new(0.0, 0.0, -camera.near, 1.0);
        let depth = on_near.z / on_near.w;
        assert!((depth - 1.0).abs() < 1e-4, "near-plane depth {depth}");

        let on_far = proj * glam::Vec4::new(0.0, 0.0, -camera.far, 1.0);
        let far_depth = on_far.z / on_far.w;
        assert!(far_depth.abs() < 1e-4, "far-plane depth {far_depth}");
    }

    #[test]
    fn test_view_projection_is_projection_times_view() {
        let camera = Camera {
            position: Vec3::new(0.0, 2.0, 10.0),
            ..Camera::default()
        };
        let vp = camera.view_projection_matrix();
        let expected = camera.projection_matrix() * camera.view_matrix();
        for (a, b) in vp.to_cols_array().iter().zip(expected.to_cols_array()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
