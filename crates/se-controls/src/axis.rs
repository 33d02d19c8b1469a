//! Mode, space and axis identity for the transform gizmo

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Active manipulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    /// Move the target along axes or planes.
    #[default]
    Translate,
    /// Rotate the target about an axis or the view direction.
    Rotate,
    /// Scale the target along its local axes.
    Scale,
}

/// Coordinate space transform deltas are expressed in.
///
/// Scale ignores this and always operates in [`GizmoSpace::Local`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoSpace {
    /// Deltas relative to the target's own orientation.
    Local,
    /// Deltas relative to the scene root orientation.
    #[default]
    World,
}

/// Identity of a single manipulation handle: one axis, one plane, or
/// the screen-aligned free handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GizmoAxis {
    /// Single X axis.
    X,
    /// Single Y axis.
    Y,
    /// Single Z axis.
    Z,
    /// XY plane (constrains motion to X and Y).
    Xy,
    /// YZ plane.
    Yz,
    /// XZ plane.
    Xz,
    /// Screen-space handle: free rotation about the view direction.
    Screen,
}

impl GizmoAxis {
    /// The three single-axis handles.
    pub const SINGLE: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    /// The three planar handles.
    pub const PLANAR: [GizmoAxis; 3] = [GizmoAxis::Xy, GizmoAxis::Yz, GizmoAxis::Xz];

    /// Whether this token constrains (or includes) the X component.
    pub fn has_x(self) -> bool {
        matches!(self, GizmoAxis::X | GizmoAxis::Xy | GizmoAxis::Xz)
    }

    /// Whether this token constrains (or includes) the Y component.
    pub fn has_y(self) -> bool {
        matches!(self, GizmoAxis::Y | GizmoAxis::Xy | GizmoAxis::Yz)
    }

    /// Whether this token constrains (or includes) the Z component.
    pub fn has_z(self) -> bool {
        matches!(self, GizmoAxis::Z | GizmoAxis::Yz | GizmoAxis::Xz)
    }

    /// Whether a compound token includes the given single axis.
    pub fn contains(self, single: GizmoAxis) -> bool {
        match single {
            GizmoAxis::X => self.has_x(),
            GizmoAxis::Y => self.has_y(),
            GizmoAxis::Z => self.has_z(),
            _ => self == single,
        }
    }

    /// Unit direction of a single axis, `None` for planes and screen.
    pub fn direction(self) -> Option<Vec3> {
        match self {
            GizmoAxis::X => Some(Vec3::X),
            GizmoAxis::Y => Some(Vec3::Y),
            GizmoAxis::Z => Some(Vec3::Z),
            _ => None,
        }
    }

    /// Normal of a planar handle, `None` otherwise.
    pub fn plane_normal(self) -> Option<Vec3> {
        match self {
            GizmoAxis::Xy => Some(Vec3::Z),
            GizmoAxis::Yz => Some(Vec3::X),
            GizmoAxis::Xz => Some(Vec3::Y),
            _ => None,
        }
    }

    /// In-plane basis (u, v) of a planar handle, `None` otherwise.
    pub fn plane_basis(self) -> Option<(Vec3, Vec3)> {
        match self {
            GizmoAxis::Xy => Some((Vec3::X, Vec3::Y)),
            GizmoAxis::Yz => Some((Vec3::Y, Vec3::Z)),
            GizmoAxis::Xz => Some((Vec3::Z, Vec3::X)),
            _ => None,
        }
    }

    /// Mask an offset vector: zero out components this token does not
    /// constrain.
    pub fn mask(self, offset: Vec3) -> Vec3 {
        Vec3::new(
            if self.has_x() { offset.x } else { 0.0 },
            if self.has_y() { offset.y } else { 0.0 },
            if self.has_z() { offset.z } else { 0.0 },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_membership() {
        assert!(GizmoAxis::Xz.contains(GizmoAxis::X));
        assert!(GizmoAxis::Xz.contains(GizmoAxis::Z));
        assert!(!GizmoAxis::Xz.contains(GizmoAxis::Y));
        assert!(GizmoAxis::X.contains(GizmoAxis::X));
        assert!(!GizmoAxis::Screen.contains(GizmoAxis::X));
    }

    #[test]
    fn masking_zeroes_unconstrained_components() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(GizmoAxis::X.mask(offset), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(GizmoAxis::Xz.mask(offset), Vec3::new(1.0, 0.0, 3.0));
        assert_eq!(GizmoAxis::Screen.mask(offset), Vec3::ZERO);
    }

    #[test]
    fn plane_basis_matches_normal() {
        for axis in GizmoAxis::PLANAR {
            let (u, v) = axis.plane_basis().unwrap();
            let n = axis.plane_normal().unwrap();
            assert!((u.cross(v) - n).length() < 1e-6);
        }
    }
}
