//! Scene graph arena
//!
//! Nodes are stored flat in a map and keyed by UUID; parent links are
//! ids, not references, so consumers (tools, controllers) can hold on
//! to a node id without tying their lifetime to the node itself.

use std::collections::HashMap;

use glam::Mat4;
use uuid::Uuid;

use crate::transform::Transform;

/// Errors raised by scene graph queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0} not found in scene")]
    NodeNotFound(Uuid),

    #[error("node {0} has no parent to resolve world transforms against")]
    Detached(Uuid),
}

/// A single scene graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: Uuid,
    pub name: String,
    /// `None` only for the scene root.
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,
    /// Transform relative to the parent node.
    pub local: Transform,
}

/// Flat scene graph with a single root node.
pub struct Scene {
    root: Uuid,
    nodes: HashMap<Uuid, Node>,
}

impl Scene {
    /// Create an empty scene containing only the root node.
    pub fn new() -> Self {
        let root = Uuid::new_v4();
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                id: root,
                name: "root".to_string(),
                parent: None,
                children: Vec::new(),
                local: Transform::IDENTITY,
            },
        );
        Self { root, nodes }
    }

    /// Id of the root node.
    pub fn root(&self) -> Uuid {
        self.root
    }

    /// Add a node under the given parent and return its id.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        parent: Uuid,
        local: Transform,
    ) -> Result<Uuid, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }

        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            Node {
                id,
                name: name.into(),
                parent: Some(parent),
                children: Vec::new(),
                local,
            },
        );
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: Uuid) -> Result<&Node, SceneError> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Look up a node mutably by id.
    pub fn node_mut(&mut self, id: Uuid) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: Uuid) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::Detached(id));
        }
        let node = self.nodes.remove(&id).ok_or(SceneError::NodeNotFound(id))?;
        if let Some(parent) = node.parent
            && let Some(parent_node) = self.nodes.get_mut(&parent)
        {
            parent_node.children.retain(|c| *c != id);
        }
        for child in node.children {
            let _ = self.remove(child);
        }
        Ok(())
    }

    /// World transform of a node, composed through all ancestors.
    pub fn world_transform(&self, id: Uuid) -> Result<Mat4, SceneError> {
        let node = self.node(id)?;
        let mut world = node.local.to_matrix();
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.node(parent_id)?;
            world = parent.local.to_matrix() * world;
            current = parent.parent;
        }
        Ok(world)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn spawn_and_lookup() {
        let mut scene = Scene::new();
        let id = scene
            .spawn("player", scene.root(), Transform::IDENTITY)
            .unwrap();

        let node = scene.node(id).unwrap();
        assert_eq!(node.name, "player");
        assert_eq!(node.parent, Some(scene.root()));
        assert!(scene.node(scene.root()).unwrap().children.contains(&id));
    }

    #[test]
    fn missing_node_is_an_error() {
        let scene = Scene::new();
        let bogus = Uuid::new_v4();
        assert_eq!(scene.node(bogus), Err(SceneError::NodeNotFound(bogus)));
    }

    #[test]
    fn world_transform_composes_through_parent() {
        let mut scene = Scene::new();
        let parent = scene
            .spawn(
                "group",
                scene.root(),
                Transform {
                    translation: Vec3::new(1.0, 0.0, 0.0),
                    rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                    scale: Vec3::splat(2.0),
                },
            )
            .unwrap();
        let child = scene
            .spawn(
                "player",
                parent,
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();

        let world = scene.world_transform(child).unwrap();
        let position = world.transform_point3(Vec3::ZERO);
        // Parent rotates +X into +Y and doubles it.
        assert!((position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn remove_drops_subtree() {
        let mut scene = Scene::new();
        let parent = scene
            .spawn("group", scene.root(), Transform::IDENTITY)
            .unwrap();
        let child = scene.spawn("player", parent, Transform::IDENTITY).unwrap();

        scene.remove(parent).unwrap();
        assert!(scene.node(parent).is_err());
        assert!(scene.node(child).is_err());
    }
}
