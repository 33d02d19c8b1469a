//! Handle geometry and interaction constants
//!
//! Handle dimensions are in gizmo-local units; they are multiplied by
//! the per-frame screen-constant scale factor before hit testing.

/// Length of a translate axis stem.
pub const STEM_LENGTH: f32 = 1.0;

/// Picking radius around a translate axis stem.
pub const STEM_PICK_RADIUS: f32 = 0.2;

/// Length of the enlarged translate stem picker.
pub const STEM_PICK_LENGTH: f32 = 0.6;

/// Offset of a planar pad center from the gizmo origin, along both
/// in-plane axes.
pub const PAD_OFFSET: f32 = 0.15;

/// Half-extent of the visible planar pad.
pub const PAD_HALF_EXTENT: f32 = 0.1;

/// Half-extent of the enlarged planar pad picker.
pub const PAD_PICK_HALF_EXTENT: f32 = 0.2;

/// Radius of the per-axis rotation rings.
pub const RING_RADIUS: f32 = 0.5;

/// Radius of the screen-space rotation ring; sits outside the axis
/// rings and the scale end-caps.
pub const SCREEN_RING_RADIUS: f32 = 1.25;

/// Band thickness of the visible rotation rings.
pub const RING_THICKNESS: f32 = 0.0075;

/// Band thickness of the ring pickers.
pub const RING_PICK_THICKNESS: f32 = 0.1;

/// Distance of a scale end-cap center from the gizmo origin.
pub const CAP_OFFSET: f32 = 0.8;

/// Half-size of the visible scale end-cap.
pub const CAP_HALF_SIZE: f32 = 0.04;

/// Picking radius of a scale end-cap.
pub const CAP_PICK_RADIUS: f32 = 0.2;

/// An axis stem is hidden when |axis . eye| exceeds this (the stem
/// would render edge-on and be unpickable).
pub const AXIS_HIDE_THRESHOLD: f32 = 0.99;

/// A planar pad is hidden when |normal . eye| falls below this (the
/// plane would be viewed too obliquely to manipulate).
pub const PLANE_HIDE_THRESHOLD: f32 = 0.2;

/// Cap on the perspective field-of-view slope used for
/// screen-constant sizing; prevents oversized handles at extreme FOV.
pub const MAX_FOV_SLOPE: f32 = 7.0;

/// Nominal handle/gizmo size ratio: final handle scale is
/// `factor * size * GIZMO_SIZE_RATIO`.
pub const GIZMO_SIZE_RATIO: f32 = 0.25;

/// Scale applied to culled handles so renderers collapse them even if
/// they ignore the visibility flag.
pub const CULLED_HANDLE_SCALE: f32 = 1e-10;

/// Numerator of the rotation speed factor; the angular sensitivity is
/// this over the camera-to-target distance.
pub const ROTATION_SPEED: f32 = 20.0;

/// Minimum magnitude of a scale-ratio denominator component.
pub const MIN_SCALE_DENOMINATOR: f32 = 1e-6;

/// Squared-length threshold below which alignment and tangent vectors
/// are treated as degenerate.
pub const DEGENERATE_LENGTH_SQ: f32 = 1e-10;
