//! Transform controller
//!
//! Orchestrates the picking plane and the visual gizmo: owns the
//! mode/space/axis state, interprets pointer events by raycasting
//! against the gizmo pickers and the picking plane, computes the
//! per-mode transform delta and writes it into the attached node's
//! local transform.
//!
//! The interaction state machine is hover -> drag-start -> drag-move
//! -> drag-end. Hosts should acquire pointer capture when they see
//! [`GizmoEvent::DragStart`] and release it on [`GizmoEvent::DragEnd`]
//! so move/up events keep routing here while a button is held.

use glam::{Quat, Vec2, Vec3};
use uuid::Uuid;

use se_core::{Scene, SceneError, Transform};

use crate::axis::{GizmoAxis, GizmoMode, GizmoSpace};
use crate::camera::{Camera, Projection};
use crate::config::ControlsConfig;
use crate::constants::{DEGENERATE_LENGTH_SQ, MIN_SCALE_DENOMINATOR, ROTATION_SPEED};
use crate::event::{EventQueue, GizmoEvent};
use crate::gizmo::{GizmoFrame, GizmoVisual};
use crate::plane::PickingPlane;

/// Pointer button state carried on every pointer event.
///
/// Moves while a drag is captured carry [`PointerButton::None`]; a
/// move with a button still marked pressed is treated as a fresh
/// press, not a drag update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button (starts and ends drags).
    Primary,
    /// Any secondary button; never starts a drag.
    Secondary,
    /// No button held.
    None,
}

/// A pointer event in normalized device coordinates, [-1, 1]^2, Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Normalized device coordinates.
    pub ndc: Vec2,
    /// Button state.
    pub button: PointerButton,
}

impl PointerInput {
    /// A hover/move event with no button held.
    pub fn hover(ndc: Vec2) -> Self {
        Self {
            ndc,
            button: PointerButton::None,
        }
    }

    /// A primary-button event.
    pub fn primary(ndc: Vec2) -> Self {
        Self {
            ndc,
            button: PointerButton::Primary,
        }
    }
}

/// Errors raised when attaching the controller to a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The node could not be resolved in the scene.
    #[error("cannot attach: {0}")]
    Scene(#[from] SceneError),

    /// The node has no parent, so world transforms cannot be resolved
    /// against anything.
    #[error("node {0} must be part of a scene hierarchy to be manipulated")]
    OutsideHierarchy(Uuid),
}

/// World-space quantities cached once per render tick by
/// [`TransformController::update`] and read by the pointer handlers.
#[derive(Debug, Clone, Copy)]
struct FrameCache {
    world_position: Vec3,
    world_rotation: Quat,
    world_rotation_inv: Quat,
    parent_rotation_inv: Quat,
    parent_scale: Vec3,
    camera_position: Vec3,
    eye: Vec3,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self {
            world_position: Vec3::ZERO,
            world_rotation: Quat::IDENTITY,
            world_rotation_inv: Quat::IDENTITY,
            parent_rotation_inv: Quat::IDENTITY,
            parent_scale: Vec3::ONE,
            camera_position: Vec3::ZERO,
            eye: Vec3::Z,
        }
    }
}

/// Snapshot of the target taken when a drag begins.
///
/// Kept across drags on purpose: when the drag-start plane raycast
/// misses, dragging still begins against the previous (stale) anchor
/// and recovers on the first move that lands on the plane.
#[derive(Debug, Clone, Copy)]
struct DragStart {
    local: Transform,
    world_position: Vec3,
    /// Drag anchor on the picking plane, relative to `world_position`.
    point_start: Vec3,
}

impl Default for DragStart {
    fn default() -> Self {
        Self {
            local: Transform::IDENTITY,
            world_position: Vec3::ZERO,
            point_start: Vec3::ZERO,
        }
    }
}

/// Interactive transform-gizmo controller for one attached node.
///
/// Multiple controllers may coexist (one per manipulable node); each
/// owns its own session state, picking plane and scratch values.
pub struct TransformController {
    config: ControlsConfig,
    target: Option<Uuid>,
    mode: GizmoMode,
    space: GizmoSpace,
    active_axis: Option<GizmoAxis>,
    dragging: bool,
    gizmo: GizmoVisual,
    plane: PickingPlane,
    cache: FrameCache,
    start: DragStart,
    point_end: Vec3,
    events: EventQueue,
}

impl TransformController {
    /// Create a detached controller.
    pub fn new(config: ControlsConfig) -> Self {
        let gizmo = GizmoVisual::new(&config.style);
        Self {
            config,
            target: None,
            mode: GizmoMode::Translate,
            space: GizmoSpace::default(),
            active_axis: None,
            dragging: false,
            gizmo,
            plane: PickingPlane::new(),
            cache: FrameCache::default(),
            start: DragStart::default(),
            point_end: Vec3::ZERO,
            events: EventQueue::default(),
        }
    }

    /// Attach the controller to a scene node and show the gizmo.
    ///
    /// Re-attaching replaces the target and resets drag state. The
    /// node must have a parent; a detached node has nothing to resolve
    /// its world transform against.
    pub fn attach(&mut self, scene: &Scene, target: Uuid) -> Result<(), AttachError> {
        let node = scene.node(target)?;
        if node.parent.is_none() {
            return Err(AttachError::OutsideHierarchy(target));
        }

        self.target = Some(target);
        self.dragging = false;
        self.set_active_axis(None);
        self.gizmo.visible = self.config.visible;
        self.events.push(GizmoEvent::Changed);
        Ok(())
    }

    /// Detach from the current target, hiding the gizmo. The node
    /// itself is untouched.
    pub fn detach(&mut self) {
        self.target = None;
        self.dragging = false;
        self.set_active_axis(None);
        self.gizmo.visible = false;
        self.events.push(GizmoEvent::Changed);
    }

    /// Currently attached node, if any.
    pub fn target(&self) -> Option<Uuid> {
        self.target
    }

    /// Current manipulation mode.
    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Switch manipulation mode.
    pub fn set_mode(&mut self, mode: GizmoMode) {
        if self.mode != mode {
            self.mode = mode;
            self.events.push(GizmoEvent::ModeChanged(mode));
            self.events.push(GizmoEvent::Changed);
        }
    }

    /// Current coordinate space.
    pub fn space(&self) -> GizmoSpace {
        self.space
    }

    /// Switch coordinate space. Scale mode ignores this and always
    /// works in local space.
    pub fn set_space(&mut self, space: GizmoSpace) {
        if self.space != space {
            self.space = space;
            self.events.push(GizmoEvent::SpaceChanged(space));
            self.events.push(GizmoEvent::Changed);
        }
    }

    /// Gizmo size multiplier.
    pub fn set_size(&mut self, size: f32) {
        if self.config.size != size && size > 0.0 {
            self.config.size = size;
            self.events.push(GizmoEvent::Changed);
        }
    }

    /// Enable or disable all pointer interaction.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled != enabled {
            self.config.enabled = enabled;
            self.events.push(GizmoEvent::Changed);
        }
    }

    /// Show or hide the gizmo (hiding also disables picking).
    pub fn set_visible(&mut self, visible: bool) {
        if self.config.visible != visible {
            self.config.visible = visible;
            self.gizmo.visible = visible && self.target.is_some();
            self.events.push(GizmoEvent::Changed);
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Hovered or dragged axis.
    pub fn active_axis(&self) -> Option<GizmoAxis> {
        self.active_axis
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The visual gizmo, for the host renderer to draw.
    pub fn gizmo(&self) -> &GizmoVisual {
        &self.gizmo
    }

    /// The picking plane (useful for debug overlays).
    pub fn picking_plane(&self) -> &PickingPlane {
        &self.plane
    }

    /// Drain all pending notifications.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GizmoEvent> + '_ {
        self.events.drain()
    }

    /// Refresh the per-tick caches: target and parent world
    /// transforms, camera pose, eye vector, plane orientation and
    /// gizmo appearance.
    ///
    /// Must run once per render tick before pointer events are
    /// interpreted; picking against stale geometry is off by exactly
    /// the camera/object motion since the last refresh.
    pub fn update(&mut self, scene: &Scene, camera: &Camera) {
        self.cache.camera_position = camera.position;

        let Some(target) = self.target else {
            return;
        };

        let node = match scene.node(target) {
            Ok(node) => node,
            Err(err) => {
                tracing::error!("transform controls target is gone: {err}");
                return;
            }
        };
        if node.parent.is_none() {
            tracing::error!(
                "transform controls target {target} must be part of a scene hierarchy"
            );
            return;
        }

        let (world, parent_world) = match (
            scene.world_transform(target),
            node.parent.map(|p| scene.world_transform(p)).transpose(),
        ) {
            (Ok(world), Ok(Some(parent))) => (world, parent),
            (world, parent) => {
                let err = world.err().or(parent.err());
                tracing::error!("failed to resolve world transforms: {err:?}");
                return;
            }
        };

        let (_, world_rotation, world_position) = world.to_scale_rotation_translation();
        let (parent_scale, parent_rotation, _) = parent_world.to_scale_rotation_translation();

        self.cache.world_position = world_position;
        self.cache.world_rotation = world_rotation;
        self.cache.world_rotation_inv = world_rotation.inverse();
        self.cache.parent_rotation_inv = parent_rotation.inverse();
        self.cache.parent_scale = parent_scale;

        // Orthographic cameras have no meaningful eye-to-target
        // direction; use the (negated) view direction instead.
        self.cache.eye = match camera.projection {
            Projection::Orthographic { .. } => camera.rotation * Vec3::Z,
            Projection::Perspective { .. } => (camera.position - world_position).normalize(),
        };

        self.plane.update_orientation(
            self.mode,
            self.active_axis,
            self.space,
            self.cache.eye,
            camera.rotation,
            world_rotation,
            world_position,
        );

        self.gizmo.update(
            camera,
            &GizmoFrame {
                world_position,
                world_rotation,
                eye: self.cache.eye,
                space: self.space,
                size: self.config.size,
                active_axis: self.active_axis,
                enabled: self.config.enabled,
            },
        );
    }

    /// Resolve which handle (if any) the pointer is over and make it
    /// the active axis, switching mode to the hit handle's mode.
    ///
    /// Picker sets are tested in translate, rotate, scale order, so
    /// overlapping handles resolve to the earlier mode.
    pub fn pointer_hover(&mut self, camera: &Camera, pointer: PointerInput) {
        if !self.config.enabled || !self.config.visible {
            return;
        }
        if self.target.is_none() || self.dragging {
            return;
        }

        let ray = camera.ray_from_ndc(pointer.ndc);
        let hit = [GizmoMode::Translate, GizmoMode::Rotate, GizmoMode::Scale]
            .into_iter()
            .find_map(|mode| self.gizmo.pick(mode, ray).map(|axis| (mode, axis)));

        match hit {
            Some((mode, axis)) => {
                self.set_mode(mode);
                self.set_active_axis(Some(axis));
            }
            None => self.set_active_axis(None),
        }
    }

    /// Begin a drag on the active axis.
    ///
    /// The hover pick re-runs first so touch input without a prior
    /// move still resolves an axis. The drag-start notification is
    /// emitted even when the plane raycast misses; in that case the
    /// anchor stays stale until a move lands on the plane.
    pub fn pointer_down(&mut self, scene: &Scene, camera: &Camera, pointer: PointerInput) {
        if !self.config.enabled {
            return;
        }
        let Some(target) = self.target else {
            return;
        };
        if self.dragging || pointer.button != PointerButton::Primary {
            return;
        }

        self.pointer_hover(camera, pointer);
        if self.active_axis.is_none() {
            return;
        }

        let ray = camera.ray_from_ndc(pointer.ndc);
        if let Some(point) = self.plane.intersect(ray)
            && let Ok(node) = scene.node(target)
            && let Ok(world) = scene.world_transform(target)
        {
            let (_, _, world_position) = world.to_scale_rotation_translation();
            self.start = DragStart {
                local: node.local,
                world_position,
                point_start: point - world_position,
            };
        }

        self.dragging = true;
        tracing::debug!(mode = ?self.mode, axis = ?self.active_axis, "drag start");
        self.events.push(GizmoEvent::DragStart(self.mode));
    }

    /// Advance an in-progress drag and apply the transform delta.
    ///
    /// Only processed for events with no button held (the capture
    /// convention); a missed plane raycast skips the frame.
    pub fn pointer_move(&mut self, scene: &mut Scene, camera: &Camera, pointer: PointerInput) {
        if !self.config.enabled {
            return;
        }
        let Some(target) = self.target else {
            return;
        };
        let Some(axis) = self.active_axis else {
            return;
        };
        if !self.dragging || pointer.button != PointerButton::None {
            return;
        }

        let ray = camera.ray_from_ndc(pointer.ndc);
        let Some(hit) = self.plane.intersect(ray) else {
            return;
        };
        self.point_end = hit - self.start.world_position;

        let new_local = match self.mode {
            GizmoMode::Translate => self.apply_translate(axis),
            GizmoMode::Scale => self.apply_scale(axis),
            GizmoMode::Rotate => self.apply_rotate(axis),
        };

        match scene.node_mut(target) {
            Ok(node) => node.local = new_local,
            Err(err) => {
                tracing::error!("transform controls target is gone: {err}");
                return;
            }
        }

        self.events.push(GizmoEvent::Changed);
        self.events.push(GizmoEvent::ObjectChanged);
    }

    /// End a drag. Clears the drag flag and the active axis
    /// unconditionally for primary-button releases.
    pub fn pointer_up(&mut self, pointer: PointerInput) {
        if !self.config.enabled || pointer.button != PointerButton::Primary {
            return;
        }

        if self.dragging && self.active_axis.is_some() {
            tracing::debug!(mode = ?self.mode, "drag end");
            self.events.push(GizmoEvent::DragEnd(self.mode));
        }

        self.dragging = false;
        self.set_active_axis(None);
    }

    /// Cancel an in-progress drag: restore the target to its
    /// drag-start transform and rewind the anchor to the current end
    /// point so a subsequent move continues without a jump. No-op when
    /// not dragging.
    pub fn reset(&mut self, scene: &mut Scene) {
        if !self.config.enabled || !self.dragging {
            return;
        }
        let Some(target) = self.target else {
            return;
        };

        match scene.node_mut(target) {
            Ok(node) => node.local = self.start.local,
            Err(err) => {
                tracing::error!("transform controls target is gone: {err}");
                return;
            }
        }

        self.events.push(GizmoEvent::Changed);
        self.events.push(GizmoEvent::ObjectChanged);
        self.start.point_start = self.point_end;
    }

    fn set_active_axis(&mut self, axis: Option<GizmoAxis>) {
        if self.active_axis != axis {
            self.active_axis = axis;
            self.events.push(GizmoEvent::AxisChanged(axis));
            self.events.push(GizmoEvent::Changed);
        }
    }

    fn apply_translate(&self, axis: GizmoAxis) -> Transform {
        let mut offset = self.point_end - self.start.point_start;

        if self.space == GizmoSpace::Local {
            offset = self.cache.world_rotation_inv * offset;
        }

        offset = axis.mask(offset);

        offset = match self.space {
            GizmoSpace::Local => (self.start.local.rotation * offset) / self.cache.parent_scale,
            GizmoSpace::World => (self.cache.parent_rotation_inv * offset) / self.cache.parent_scale,
        };

        Transform {
            translation: self.start.local.translation + offset,
            ..self.start.local
        }
    }

    fn apply_scale(&self, axis: GizmoAxis) -> Transform {
        // Scale is always relative to the local frame at drag start
        let start = self.cache.world_rotation_inv * self.start.point_start;
        let end = self.cache.world_rotation_inv * self.point_end;

        let mut ratio = end / clamp_denominator(start);
        if !axis.has_x() {
            ratio.x = 1.0;
        }
        if !axis.has_y() {
            ratio.y = 1.0;
        }
        if !axis.has_z() {
            ratio.z = 1.0;
        }

        Transform {
            scale: self.start.local.scale * ratio,
            ..self.start.local
        }
    }

    fn apply_rotate(&self, axis: GizmoAxis) -> Transform {
        let offset = self.point_end - self.start.point_start;

        // Angular sensitivity stays visually constant at any zoom
        let speed = ROTATION_SPEED
            / self
                .cache
                .world_position
                .distance(self.cache.camera_position);

        let mut rotation_axis = self.cache.eye;
        let mut angle = 0.0;
        let mut in_plane = true;

        if let Some(direction) = axis.direction() {
            let mut tangent_source = direction;
            if self.space == GizmoSpace::Local {
                tangent_source = self.cache.world_rotation * tangent_source;
            }
            let tangent = tangent_source.cross(self.cache.eye);

            // A zero cross product means the rotation axis points at
            // the camera; fall back to free rotation.
            if tangent.length_squared() >= DEGENERATE_LENGTH_SQ {
                rotation_axis = direction;
                angle = offset.dot(tangent.normalize()) * speed;
                in_plane = false;
            }
        }

        if in_plane {
            rotation_axis = self.cache.eye;
            angle = self.point_end.angle_between(self.start.point_start);

            let start_norm = self.start.point_start.normalize();
            let end_norm = self.point_end.normalize();
            // Which side of the eye the cross falls on decides the
            // winding direction
            angle *= if end_norm.cross(start_norm).dot(self.cache.eye) < 0.0 {
                1.0
            } else {
                -1.0
            };
        }

        let rotation = match self.space {
            GizmoSpace::Local => {
                (self.start.local.rotation * Quat::from_axis_angle(rotation_axis, angle))
                    .normalize()
            }
            GizmoSpace::World => {
                let parent_axis = self.cache.parent_rotation_inv * rotation_axis;
                (Quat::from_axis_angle(parent_axis, angle) * self.start.local.rotation).normalize()
            }
        };

        Transform {
            rotation,
            ..self.start.local
        }
    }
}

/// Clamp each component's magnitude away from zero, preserving sign,
/// so the scale-ratio division cannot blow up to infinity when a drag
/// passes through the plane-alignment singularity.
fn clamp_denominator(v: Vec3) -> Vec3 {
    Vec3::new(
        v.x.signum() * v.x.abs().max(MIN_SCALE_DENOMINATOR),
        v.y.signum() * v.y.abs().max(MIN_SCALE_DENOMINATOR),
        v.z.signum() * v.z.abs().max(MIN_SCALE_DENOMINATOR),
    )
}
