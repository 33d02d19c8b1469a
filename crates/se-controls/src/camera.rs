//! Camera provider for picking and gizmo sizing
//!
//! The controller does not own a camera; it consumes this provider
//! for the camera's world pose, the projection parameters needed for
//! screen-constant handle sizing, and NDC-to-world ray unprojection.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::ray::Ray;

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov: f32,
        /// Width / height.
        aspect: f32,
        /// Near clipping plane.
        near: f32,
        /// Far clipping plane.
        far: f32,
        /// Zoom multiplier (narrows the effective field of view).
        zoom: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Left extent.
        left: f32,
        /// Right extent.
        right: f32,
        /// Top extent.
        top: f32,
        /// Bottom extent.
        bottom: f32,
        /// Near clipping plane.
        near: f32,
        /// Far clipping plane.
        far: f32,
        /// Zoom multiplier (shrinks the extents).
        zoom: f32,
    },
}

/// A camera with a world pose and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position.
    pub position: Vec3,
    /// World orientation; the camera looks along its local -Z.
    pub rotation: Quat,
    /// Projection parameters.
    pub projection: Projection,
}

impl Camera {
    /// Create a perspective camera at `position` looking at `target`.
    pub fn perspective_looking_at(position: Vec3, target: Vec3, fov: f32, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let rotation = Quat::from_mat4(&view.inverse());
        Self {
            position,
            rotation,
            projection: Projection::Perspective {
                fov,
                aspect,
                near: 0.1,
                far: 1000.0,
                zoom: 1.0,
            },
        }
    }

    /// Create an orthographic camera at `position` looking at `target`.
    pub fn orthographic_looking_at(
        position: Vec3,
        target: Vec3,
        half_height: f32,
        aspect: f32,
    ) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let rotation = Quat::from_mat4(&view.inverse());
        Self {
            position,
            rotation,
            projection: Projection::Orthographic {
                left: -half_height * aspect,
                right: half_height * aspect,
                top: half_height,
                bottom: -half_height,
                near: 0.1,
                far: 1000.0,
                zoom: 1.0,
            },
        }
    }

    /// View direction (local -Z rotated into world space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// View matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Projection matrix with zoom applied.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov,
                aspect,
                near,
                far,
                zoom,
            } => {
                let half_tan = (fov * 0.5).tan() / zoom;
                Mat4::perspective_rh(2.0 * half_tan.atan(), aspect, near, far)
            }
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
                zoom,
            } => Mat4::orthographic_rh(
                left / zoom,
                right / zoom,
                bottom / zoom,
                top / zoom,
                near,
                far,
            ),
        }
    }

    /// Cast a world-space ray through a normalized device coordinate
    /// in [-1, 1]^2 (Y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv_proj = self.projection_matrix().inverse();
        let world = Mat4::from_rotation_translation(self.rotation, self.position);

        // Unproject points on the near and far planes (depth 0..1)
        let near_clip = Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far_clip = Vec4::new(ndc.x, ndc.y, 1.0, 1.0);

        let near_view = inv_proj * near_clip;
        let far_view = inv_proj * far_clip;
        let near_view = near_view.truncate() / near_view.w;
        let far_view = far_view.truncate() / far_view.w;

        let near_world = world.transform_point3(near_view);
        let far_world = world.transform_point3(far_view);

        Ray::new(near_world, far_world - near_world)
    }
}
