//! Invisible picking plane
//!
//! A single infinite plane, never rendered, used only as a
//! ray-intersection target to recover a 3D drag point from 2D pointer
//! input. Its orientation tracks the current mode/axis/space so the
//! intersection is geometrically meaningful for the active handle.

use glam::{Quat, Vec3};

use crate::axis::{GizmoAxis, GizmoMode, GizmoSpace};
use crate::constants::DEGENERATE_LENGTH_SQ;
use crate::ray::{Ray, ray_plane_intersection};

/// The drag picking plane.
#[derive(Debug, Clone, Copy)]
pub struct PickingPlane {
    origin: Vec3,
    normal: Vec3,
}

impl PickingPlane {
    /// Create a plane at the world origin facing +Z.
    pub fn new() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::Z,
        }
    }

    /// Current plane origin (the target's world position).
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Current unit plane normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Re-orient the plane for the current mode, axis and space.
    ///
    /// Rotate mode (and any axis without a constrained direction)
    /// faces the camera directly, which keeps the plane usable for
    /// free rotation. Translate/scale single axes get a plane that
    /// contains the axis while facing the camera as much as possible;
    /// planar axes use the named plane itself. Any degenerate
    /// alignment falls back to camera-facing.
    #[allow(clippy::too_many_arguments)]
    pub fn update_orientation(
        &mut self,
        mode: GizmoMode,
        axis: Option<GizmoAxis>,
        space: GizmoSpace,
        eye: Vec3,
        camera_rotation: Quat,
        object_rotation: Quat,
        object_position: Vec3,
    ) {
        self.origin = object_position;

        // Scale is always relative to local orientation
        let space = if mode == GizmoMode::Scale {
            GizmoSpace::Local
        } else {
            space
        };
        let orientation = match space {
            GizmoSpace::Local => object_rotation,
            GizmoSpace::World => Quat::IDENTITY,
        };

        let camera_facing = camera_rotation * Vec3::Z;

        self.normal = match (mode, axis) {
            (GizmoMode::Rotate, _) | (_, None) | (_, Some(GizmoAxis::Screen)) => camera_facing,
            (_, Some(axis)) => {
                if let Some(direction) = axis.direction() {
                    // Component of the eye vector perpendicular to the
                    // axis: the plane contains the axis and faces the
                    // camera as much as possible.
                    let dir = orientation * direction;
                    let aligned = eye - dir * eye.dot(dir);
                    if aligned.length_squared() < DEGENERATE_LENGTH_SQ {
                        camera_facing
                    } else {
                        aligned.normalize()
                    }
                } else if let Some(normal) = axis.plane_normal() {
                    orientation * normal
                } else {
                    camera_facing
                }
            }
        };
    }

    /// Intersect a ray with the plane, returning the hit point.
    pub fn intersect(&self, ray: Ray) -> Option<Vec3> {
        ray_plane_intersection(ray, self.origin, self.normal).map(|t| ray.at(t))
    }
}

impl Default for PickingPlane {
    fn default() -> Self {
        Self::new()
    }
}
