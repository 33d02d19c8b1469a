//! Visual gizmo handles and pickers
//!
//! Owns the named handle sets for the three manipulation modes. Each
//! handle is an opaque pickable shape plus render state (color,
//! orientation, scale, visibility); the actual mesh used to draw a
//! handle is the host renderer's business. Pickers are enlarged
//! invisible twins of the visual handles, following the convention
//! that hit testing uses fatter geometry than what is drawn.

use glam::{Quat, Vec3};

use crate::axis::{GizmoAxis, GizmoMode, GizmoSpace};
use crate::camera::{Camera, Projection};
use crate::config::GizmoStyle;
use crate::constants::*;
use crate::ray::{
    Ray, ray_cylinder_intersection, ray_quad_intersection, ray_ring_intersection,
    ray_sphere_intersection,
};

/// Pickable shape of a handle, in gizmo-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleShape {
    /// Cylinder from the gizmo origin along the handle axis.
    Stem {
        /// Cylinder length.
        length: f32,
        /// Cylinder radius.
        radius: f32,
    },
    /// Square patch offset diagonally into the handle plane.
    Pad {
        /// Half-extent along each in-plane axis.
        half_extent: f32,
    },
    /// Annular band around the handle axis.
    Ring {
        /// Ring radius.
        radius: f32,
        /// Band thickness.
        thickness: f32,
    },
    /// Sphere at the tip of the handle axis.
    Cap {
        /// Distance of the cap center from the origin.
        offset: f32,
        /// Sphere radius.
        radius: f32,
    },
}

/// One named handle: axis identity, shape, and per-frame appearance.
#[derive(Debug, Clone)]
pub struct Handle {
    /// Which axis or plane this handle manipulates.
    pub axis: GizmoAxis,
    /// Pickable shape.
    pub shape: HandleShape,
    /// Current color (RGBA); highlight overrides the base color.
    pub color: [f32; 4],
    /// World position (the gizmo origin).
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Uniform scale applied to the shape.
    pub scale: f32,
    /// Whether the handle is drawn and pickable this frame.
    pub visible: bool,
    base_color: [f32; 4],
}

impl Handle {
    fn new(axis: GizmoAxis, shape: HandleShape, color: [f32; 4]) -> Self {
        Self {
            axis,
            shape,
            color,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            visible: true,
            base_color: color,
        }
    }

    /// Intersect a ray against the handle's shape at its current
    /// transform. Invisible handles never hit.
    pub fn hit(&self, ray: Ray) -> Option<f32> {
        if !self.visible {
            return None;
        }
        let s = self.scale;
        match self.shape {
            HandleShape::Stem { length, radius } => {
                let dir = self.rotation * self.axis.direction()?;
                ray_cylinder_intersection(
                    ray,
                    self.position,
                    self.position + dir * length * s,
                    radius * s,
                )
            }
            HandleShape::Pad { half_extent } => {
                let (u_local, v_local) = self.axis.plane_basis()?;
                let u = self.rotation * u_local;
                let v = self.rotation * v_local;
                let center = self.position + (u + v) * PAD_OFFSET * s;
                ray_quad_intersection(ray, center, u, v, half_extent * s)
            }
            HandleShape::Ring { radius, thickness } => {
                let normal = match self.axis.direction() {
                    Some(dir) => self.rotation * dir,
                    // Screen ring lies in the camera plane
                    None => self.rotation * Vec3::Z,
                };
                ray_ring_intersection(ray, self.position, normal, radius * s, thickness * s)
            }
            HandleShape::Cap { offset, radius } => {
                let dir = self.rotation * self.axis.direction()?;
                ray_sphere_intersection(ray, self.position + dir * offset * s, radius * s)
            }
        }
    }
}

/// Per-frame state the gizmo appearance is derived from.
#[derive(Debug, Clone, Copy)]
pub struct GizmoFrame {
    /// Target world position (the gizmo origin).
    pub world_position: Vec3,
    /// Target world orientation.
    pub world_rotation: Quat,
    /// Unit eye vector (camera toward target, or view direction for
    /// orthographic cameras).
    pub eye: Vec3,
    /// Current coordinate space.
    pub space: GizmoSpace,
    /// Gizmo size multiplier.
    pub size: f32,
    /// Currently hovered or dragged axis.
    pub active_axis: Option<GizmoAxis>,
    /// Whether interaction is enabled (gates highlighting).
    pub enabled: bool,
}

struct HandleSet {
    visual: Vec<Handle>,
    pickers: Vec<Handle>,
}

/// The three named handle sets and their per-frame appearance logic.
pub struct GizmoVisual {
    /// Whether the whole gizmo is shown; cleared on detach.
    pub visible: bool,
    translate: HandleSet,
    rotate: HandleSet,
    scale: HandleSet,
    highlight_color: [f32; 4],
}

/// Scale factor that keeps a handle's apparent screen size constant.
///
/// Perspective: distance to the target times the FOV slope, with the
/// slope capped so extreme fields of view do not balloon the gizmo.
/// Orthographic: the vertical extent over zoom.
pub fn screen_scale_factor(camera: &Camera, position: Vec3) -> f32 {
    match camera.projection {
        Projection::Orthographic {
            top, bottom, zoom, ..
        } => (top - bottom) / zoom,
        Projection::Perspective { fov, zoom, .. } => {
            position.distance(camera.position) * ((1.9 * (fov * 0.5).tan()) / zoom).min(MAX_FOV_SLOPE)
        }
    }
}

fn axis_color(style: &GizmoStyle, axis: GizmoAxis) -> [f32; 4] {
    match axis {
        GizmoAxis::X => style.x_color,
        GizmoAxis::Y => style.y_color,
        GizmoAxis::Z => style.z_color,
        GizmoAxis::Screen => style.screen_color,
        // Pads blend their two member axis colors
        GizmoAxis::Xy => blend(style.x_color, style.y_color, style.pad_opacity),
        GizmoAxis::Yz => blend(style.y_color, style.z_color, style.pad_opacity),
        GizmoAxis::Xz => blend(style.x_color, style.z_color, style.pad_opacity),
    }
}

fn blend(a: [f32; 4], b: [f32; 4], opacity: f32) -> [f32; 4] {
    [
        (a[0] + b[0]) * 0.5,
        (a[1] + b[1]) * 0.5,
        (a[2] + b[2]) * 0.5,
        opacity,
    ]
}

impl GizmoVisual {
    /// Build the handle sets with colors from the style.
    pub fn new(style: &GizmoStyle) -> Self {
        let stem = |axis, length, radius| {
            Handle::new(axis, HandleShape::Stem { length, radius }, axis_color(style, axis))
        };
        let pad = |axis, half_extent| {
            Handle::new(axis, HandleShape::Pad { half_extent }, axis_color(style, axis))
        };
        let ring = |axis, radius, thickness| {
            Handle::new(axis, HandleShape::Ring { radius, thickness }, axis_color(style, axis))
        };
        let cap = |axis, offset, radius| {
            Handle::new(axis, HandleShape::Cap { offset, radius }, axis_color(style, axis))
        };

        let translate = HandleSet {
            visual: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| stem(a, STEM_LENGTH, RING_THICKNESS))
                .chain(GizmoAxis::PLANAR.into_iter().map(|a| pad(a, PAD_HALF_EXTENT)))
                .collect(),
            pickers: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| stem(a, STEM_PICK_LENGTH, STEM_PICK_RADIUS))
                .chain(
                    GizmoAxis::PLANAR
                        .into_iter()
                        .map(|a| pad(a, PAD_PICK_HALF_EXTENT)),
                )
                .collect(),
        };

        let rotate = HandleSet {
            visual: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| ring(a, RING_RADIUS, RING_THICKNESS))
                .chain([ring(GizmoAxis::Screen, SCREEN_RING_RADIUS, RING_THICKNESS)])
                .collect(),
            pickers: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| ring(a, RING_RADIUS, RING_PICK_THICKNESS))
                .chain([ring(
                    GizmoAxis::Screen,
                    SCREEN_RING_RADIUS,
                    RING_PICK_THICKNESS,
                )])
                .collect(),
        };

        let scale = HandleSet {
            visual: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| cap(a, CAP_OFFSET, CAP_HALF_SIZE))
                .chain(GizmoAxis::PLANAR.into_iter().map(|a| pad(a, PAD_HALF_EXTENT)))
                .collect(),
            pickers: GizmoAxis::SINGLE
                .into_iter()
                .map(|a| cap(a, CAP_OFFSET, CAP_PICK_RADIUS))
                .chain(
                    GizmoAxis::PLANAR
                        .into_iter()
                        .map(|a| pad(a, PAD_PICK_HALF_EXTENT)),
                )
                .collect(),
        };

        Self {
            visible: false,
            translate,
            rotate,
            scale,
            highlight_color: style.highlight_color,
        }
    }

    /// Visible handles for a mode, for the host renderer to draw.
    pub fn handles(&self, mode: GizmoMode) -> &[Handle] {
        &self.set(mode).visual
    }

    /// Picker handles for a mode.
    pub fn pickers(&self, mode: GizmoMode) -> &[Handle] {
        &self.set(mode).pickers
    }

    fn set(&self, mode: GizmoMode) -> &HandleSet {
        match mode {
            GizmoMode::Translate => &self.translate,
            GizmoMode::Rotate => &self.rotate,
            GizmoMode::Scale => &self.scale,
        }
    }

    /// Refresh position, scale, orientation, visibility and highlight
    /// of every handle from this frame's camera and target state.
    ///
    /// All three modes are refreshed every frame because hover picking
    /// tests all three picker sets, not just the current mode's.
    pub fn update(&mut self, camera: &Camera, frame: &GizmoFrame) {
        let factor = screen_scale_factor(camera, frame.world_position);
        let handle_scale = factor * frame.size * GIZMO_SIZE_RATIO;
        let camera_rotation = camera.rotation;
        let highlight = self.highlight_color;

        for mode in [GizmoMode::Translate, GizmoMode::Rotate, GizmoMode::Scale] {
            // Scale handles always orient to the local rotation
            let space = if mode == GizmoMode::Scale {
                GizmoSpace::Local
            } else {
                frame.space
            };
            let orientation = match space {
                GizmoSpace::Local => frame.world_rotation,
                GizmoSpace::World => Quat::IDENTITY,
            };

            let set = match mode {
                GizmoMode::Translate => &mut self.translate,
                GizmoMode::Rotate => &mut self.rotate,
                GizmoMode::Scale => &mut self.scale,
            };

            for handle in set.visual.iter_mut().chain(set.pickers.iter_mut()) {
                handle.visible = true;
                handle.position = frame.world_position;
                handle.scale = handle_scale;
                handle.rotation = orientation;

                match mode {
                    GizmoMode::Translate | GizmoMode::Scale => {
                        Self::cull_against_eye(handle, orientation, frame.eye);
                    }
                    GizmoMode::Rotate => {
                        Self::orient_ring(handle, orientation, camera_rotation, frame.eye);
                    }
                }

                handle.color = handle.base_color;
                if frame.enabled
                    && let Some(active) = frame.active_axis
                {
                    let hot = handle.axis == active
                        || (handle.axis.direction().is_some() && active.contains(handle.axis));
                    if hot {
                        handle.color = highlight;
                    }
                }
            }
        }
    }

    /// Hide handles that would render edge-on: axis handles whose
    /// direction is nearly parallel to the eye, and planar pads whose
    /// normal is nearly perpendicular to it.
    fn cull_against_eye(handle: &mut Handle, orientation: Quat, eye: Vec3) {
        let culled = if let Some(dir) = handle.axis.direction() {
            (orientation * dir).dot(eye).abs() > AXIS_HIDE_THRESHOLD
        } else if let Some(normal) = handle.axis.plane_normal() {
            (orientation * normal).dot(eye).abs() < PLANE_HIDE_THRESHOLD
        } else {
            false
        };

        if culled {
            handle.visible = false;
            handle.scale = CULLED_HANDLE_SCALE;
        }
    }

    /// Spin each rotation ring about its own axis so the ring's gap
    /// tracks the camera azimuth; the screen ring always faces the
    /// camera directly.
    fn orient_ring(handle: &mut Handle, orientation: Quat, camera_rotation: Quat, eye: Vec3) {
        let align = orientation.inverse() * eye;
        match handle.axis {
            GizmoAxis::X => {
                let spin = Quat::from_axis_angle(Vec3::X, (-align.y).atan2(align.z));
                handle.rotation = orientation * spin;
            }
            GizmoAxis::Y => {
                let spin = Quat::from_axis_angle(Vec3::Y, align.x.atan2(align.z));
                handle.rotation = orientation * spin;
            }
            GizmoAxis::Z => {
                let spin = Quat::from_axis_angle(Vec3::Z, align.y.atan2(align.x));
                handle.rotation = orientation * spin;
            }
            _ => {
                handle.rotation = camera_rotation;
            }
        }
    }

    /// Pick the closest visible picker handle of a mode.
    pub fn pick(&self, mode: GizmoMode, ray: Ray) -> Option<GizmoAxis> {
        if !self.visible {
            return None;
        }

        let mut closest: Option<(f32, GizmoAxis)> = None;
        for handle in &self.set(mode).pickers {
            if let Some(t) = handle.hit(ray)
                && closest.is_none_or(|(best, _)| t < best)
            {
                closest = Some((t, handle.axis));
            }
        }
        closest.map(|(_, axis)| axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GizmoStyle;

    fn test_camera() -> Camera {
        Camera::perspective_looking_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            50.0_f32.to_radians(),
            1.0,
        )
    }

    fn frame(active: Option<GizmoAxis>) -> GizmoFrame {
        GizmoFrame {
            world_position: Vec3::ZERO,
            world_rotation: Quat::IDENTITY,
            eye: Vec3::Z,
            space: GizmoSpace::World,
            size: 1.0,
            active_axis: active,
            enabled: true,
        }
    }

    fn updated_gizmo(active: Option<GizmoAxis>) -> GizmoVisual {
        let mut gizmo = GizmoVisual::new(&GizmoStyle::dark());
        gizmo.visible = true;
        gizmo.update(&test_camera(), &frame(active));
        gizmo
    }

    fn find(gizmo: &GizmoVisual, mode: GizmoMode, axis: GizmoAxis) -> &Handle {
        gizmo
            .handles(mode)
            .iter()
            .find(|h| h.axis == axis)
            .unwrap()
    }

    #[test]
    fn orthographic_factor_ignores_distance() {
        let camera = Camera::orthographic_looking_at(
            Vec3::new(0.0, 0.0, 100.0),
            Vec3::ZERO,
            2.0,
            1.0,
        );
        assert!((screen_scale_factor(&camera, Vec3::ZERO) - 4.0).abs() < 1e-5);
        assert!((screen_scale_factor(&camera, Vec3::new(0.0, 0.0, 50.0)) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_factor_grows_with_distance_and_clamps() {
        let near = test_camera();
        let f_near = screen_scale_factor(&near, Vec3::ZERO);

        let far = Camera::perspective_looking_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            50.0_f32.to_radians(),
            1.0,
        );
        let f_far = screen_scale_factor(&far, Vec3::ZERO);
        assert!((f_far / f_near - 2.0).abs() < 1e-4);

        // At an absurd FOV the slope caps out at distance * 7
        let wide = Camera::perspective_looking_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            178.0_f32.to_radians(),
            1.0,
        );
        assert!((screen_scale_factor(&wide, Vec3::ZERO) - 35.0).abs() < 1e-3);
    }

    #[test]
    fn axis_facing_camera_is_culled() {
        // Camera on +Z: the Z stem points straight at the eye
        let gizmo = updated_gizmo(None);
        assert!(!find(&gizmo, GizmoMode::Translate, GizmoAxis::Z).visible);
        assert!(find(&gizmo, GizmoMode::Translate, GizmoAxis::X).visible);
        assert!(find(&gizmo, GizmoMode::Translate, GizmoAxis::Y).visible);
    }

    #[test]
    fn oblique_plane_pads_are_culled() {
        // Camera on +Z: the XZ and YZ pads are viewed edge-on
        let gizmo = updated_gizmo(None);
        assert!(!find(&gizmo, GizmoMode::Translate, GizmoAxis::Xz).visible);
        assert!(!find(&gizmo, GizmoMode::Translate, GizmoAxis::Yz).visible);
        assert!(find(&gizmo, GizmoMode::Translate, GizmoAxis::Xy).visible);
    }

    #[test]
    fn culled_handles_are_unpickable() {
        let gizmo = updated_gizmo(None);
        let z_picker = gizmo
            .pickers(GizmoMode::Translate)
            .iter()
            .find(|h| h.axis == GizmoAxis::Z)
            .unwrap();
        // Ray straight down the Z stem would hit if not culled
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(z_picker.hit(ray).is_none());
    }

    #[test]
    fn compound_axis_highlights_member_stems() {
        let style = GizmoStyle::dark();
        let gizmo = updated_gizmo(Some(GizmoAxis::Xy));

        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::X).color,
            style.highlight_color
        );
        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::Y).color,
            style.highlight_color
        );
        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::Xy).color,
            style.highlight_color
        );
        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::Z).color,
            style.z_color
        );
    }

    #[test]
    fn highlight_reverts_when_axis_clears() {
        let style = GizmoStyle::dark();
        let mut gizmo = GizmoVisual::new(&style);
        gizmo.visible = true;
        let camera = test_camera();

        gizmo.update(&camera, &frame(Some(GizmoAxis::X)));
        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::X).color,
            style.highlight_color
        );

        gizmo.update(&camera, &frame(None));
        assert_eq!(
            find(&gizmo, GizmoMode::Translate, GizmoAxis::X).color,
            style.x_color
        );
    }

    #[test]
    fn pick_finds_stem_under_ray() {
        let gizmo = updated_gizmo(None);
        let camera = test_camera();
        let factor = screen_scale_factor(&camera, Vec3::ZERO) * GIZMO_SIZE_RATIO;

        // Aim at the middle of the X stem picker
        let target = Vec3::new(0.3 * factor, 0.0, 0.0);
        let ray = Ray::new(camera.position, target - camera.position);
        assert_eq!(gizmo.pick(GizmoMode::Translate, ray), Some(GizmoAxis::X));
    }

    #[test]
    fn hidden_gizmo_never_picks() {
        let mut gizmo = updated_gizmo(None);
        gizmo.visible = false;
        let ray = Ray::new(Vec3::new(0.3, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(gizmo.pick(GizmoMode::Translate, ray), None);
    }

    #[test]
    fn screen_ring_faces_camera() {
        let camera = Camera::perspective_looking_at(
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::ZERO,
            50.0_f32.to_radians(),
            1.0,
        );
        let mut gizmo = GizmoVisual::new(&GizmoStyle::dark());
        gizmo.visible = true;
        let eye = (camera.position - Vec3::ZERO).normalize();
        gizmo.update(
            &camera,
            &GizmoFrame {
                eye,
                ..frame(None)
            },
        );

        let screen = find(&gizmo, GizmoMode::Rotate, GizmoAxis::Screen);
        let normal = screen.rotation * Vec3::Z;
        // Ring plane is perpendicular to the view direction
        assert!(normal.dot(camera.forward()).abs() > 0.999);
    }

    #[test]
    fn ring_spin_keeps_normal_on_axis() {
        let gizmo = updated_gizmo(None);
        let y_ring = find(&gizmo, GizmoMode::Rotate, GizmoAxis::Y);
        let normal = y_ring.rotation * Vec3::Y;
        assert!((normal - Vec3::Y).length() < 1e-5);
    }
}
