//! Scene Editor Transform Controls
//!
//! Interactive transform gizmo for manipulating scene nodes with a
//! pointer: translate along axes and planes, rotate about axes or the
//! view direction, and scale along local axes.
//!
//! # Architecture
//!
//! Three cooperating pieces, driven by the host once per frame:
//!
//! - [`controller::TransformController`] - Interaction state machine;
//!   consumes pointer events, mutates the attached node
//! - [`gizmo::GizmoVisual`] - Named handle sets with per-frame
//!   appearance (sizing, culling, highlight) and analytic picking
//! - [`plane::PickingPlane`] - Invisible plane that turns 2D pointer
//!   motion into 3D drag points
//!
//! The controller renders nothing itself; the host draws
//! [`gizmo::Handle`]s however it likes and feeds camera state through
//! [`camera::Camera`].
//!
//! # Module Structure
//!
//! ```text
//! se-controls/
//! ├── axis.rs        # Mode/space/axis identity
//! ├── camera.rs      # Camera pose, projection, ray unprojection
//! ├── config.rs      # Serializable controls configuration
//! ├── constants.rs   # Handle geometry and interaction constants
//! ├── controller.rs  # TransformController state machine
//! ├── event.rs       # Controller notifications
//! ├── gizmo.rs       # Handle sets, appearance, picking
//! ├── plane.rs       # Drag picking plane
//! └── ray.rs         # Analytic ray intersection primitives
//! ```
//!
//! # Frame loop
//!
//! ```no_run
//! # use glam::{Vec2, Vec3};
//! # use se_core::{Scene, Transform};
//! # use se_controls::{Camera, ControlsConfig, PointerInput, TransformController};
//! let mut scene = Scene::new();
//! let node = scene.spawn("box", scene.root(), Transform::IDENTITY)?;
//! let camera = Camera::perspective_looking_at(
//!     Vec3::new(3.0, 2.0, 5.0),
//!     Vec3::ZERO,
//!     50.0_f32.to_radians(),
//!     16.0 / 9.0,
//! );
//!
//! let mut controls = TransformController::new(ControlsConfig::default());
//! controls.attach(&scene, node)?;
//!
//! // Every frame: refresh caches, pump pointer input, drain events
//! controls.update(&scene, &camera);
//! controls.pointer_hover(&camera, PointerInput::hover(Vec2::ZERO));
//! for event in controls.drain_events() {
//!     // react: disable orbit during drags, mark the scene dirty, ...
//!     let _ = event;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod axis;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod event;
pub mod gizmo;
pub mod plane;
pub mod ray;

pub use axis::{GizmoAxis, GizmoMode, GizmoSpace};
pub use camera::{Camera, Projection};
pub use config::{ControlsConfig, GizmoStyle};
pub use controller::{AttachError, PointerButton, PointerInput, TransformController};
pub use event::GizmoEvent;
pub use gizmo::{GizmoFrame, GizmoVisual, Handle, HandleShape, screen_scale_factor};
pub use plane::PickingPlane;
pub use ray::Ray;
