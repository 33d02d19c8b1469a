//! Scene Editor Core
//!
//! Scene-model types shared across the editor: parent-relative
//! transforms and the scene graph arena that world transforms are
//! composed through. Rendering and input handling live elsewhere.

pub mod scene;
pub mod transform;

pub use scene::{Node, Scene, SceneError};
pub use transform::Transform;
