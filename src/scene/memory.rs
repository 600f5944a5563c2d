use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use super::{NodeId, SceneGraph, Surface};
use crate::math::geometry::Annulus;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Group,
    Sphere { radius: f32 },
    Annulus(Annulus),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub shape: Shape,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub translation: Translation3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub surface: Option<Surface>,
}

impl Node {
    fn new(shape: Shape, parent: Option<NodeId>) -> Self {
        Node {
            shape,
            parent,
            children: vec![],
            translation: Translation3::identity(),
            rotation: UnitQuaternion::identity(),
            surface: None,
        }
    }

    pub fn local_transform(&self) -> Isometry3<f32> {
        Isometry3::from_parts(self.translation, self.rotation)
    }
}

/// A scene graph that only remembers what was asked of it.
///
/// Nodes live in one arena and are never removed, so a [NodeId] stays valid
/// for the life of the scene. Index 0 is the root group.
#[derive(Debug, Clone)]
pub struct MemoryScene {
    nodes: Vec<Node>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        MemoryScene {
            nodes: vec![Node::new(Shape::Group, None)],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root is always there
        false
    }

    pub fn world_transform(&self, id: NodeId) -> Isometry3<f32> {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self.world_transform(parent) * node.local_transform(),
            None => node.local_transform(),
        }
    }

    fn add_node(&mut self, parent: NodeId, shape: Shape) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(shape, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

impl SceneGraph for MemoryScene {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn add_group(&mut self, parent: NodeId) -> NodeId {
        self.add_node(parent, Shape::Group)
    }

    fn add_sphere(&mut self, parent: NodeId, radius: f32) -> NodeId {
        self.add_node(parent, Shape::Sphere { radius })
    }

    fn add_annulus(&mut self, parent: NodeId, annulus: &Annulus) -> NodeId {
        self.add_node(parent, Shape::Annulus(*annulus))
    }

    fn set_surface(&mut self, node: NodeId, surface: &Surface) {
        self.node_mut(node).surface = Some(surface.clone());
    }

    fn set_local_translation(&mut self, node: NodeId, translation: Translation3<f32>) {
        self.node_mut(node).translation = translation;
    }

    fn set_local_rotation(&mut self, node: NodeId, rotation: UnitQuaternion<f32>) {
        self.node_mut(node).rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    use crate::math::geometry::rotation_about_vertical;

    #[test]
    fn test_tree_bookkeeping() {
        let mut scene = MemoryScene::new();
        let root = scene.root();
        let group = scene.add_group(root);
        let sphere = scene.add_sphere(group, 2.0);
        let other = scene.add_sphere(root, 1.0);

        assert_eq!(scene.len(), 4);
        assert_eq!(scene.children(root), &[group, other]);
        assert_eq!(scene.children(group), &[sphere]);
        assert!(scene.children(sphere).is_empty());
        assert_eq!(scene.node(sphere).parent, Some(group));
        assert_eq!(scene.node(sphere).shape, Shape::Sphere { radius: 2.0 });
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut scene = MemoryScene::new();
        let root = scene.root();
        let group = scene.add_group(root);
        let sphere = scene.add_sphere(group, 1.0);
        scene.set_local_translation(sphere, Translation3::new(10.0, 0.0, 0.0));

        // Quarter turn of the group carries the child from +x to -z
        scene.set_local_rotation(group, rotation_about_vertical(0.5 * std::f32::consts::PI));
        let position = scene.world_transform(sphere) * Point3::origin();
        assert_relative_eq!(position, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-5);

        // Spinning the child in place doesn't move it
        scene.set_local_rotation(sphere, rotation_about_vertical(1.0));
        let position = scene.world_transform(sphere) * Point3::origin();
        assert_relative_eq!(position, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
        assert_relative_eq!(
            scene.node(sphere).translation.vector,
            Vector3::new(10.0, 0.0, 0.0)
        );
    }
}
