//! The seam between the orrery and whatever retained scene graph draws it.
//!
//! [SceneGraph] is the handful of operations the builder and the motion
//! updater need. `gui::KissScene` implements it on top of kiss3d's scene
//! nodes; [MemoryScene] implements it as a plain tree so the whole scene can
//! be built, animated, and inspected without a window.

use nalgebra::{Point3, Translation3, UnitQuaternion};

use crate::math::geometry::Annulus;
use crate::texture::{Texture, TextureSource};

mod builder;
mod memory;

pub use builder::BuiltScene;
pub use memory::{MemoryScene, Node, Shape};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Which faces of a mesh get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    /// Inside faces, for things the camera sits within.
    Back,
    Double,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Texture(Texture),
    Color(Point3<f32>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub paint: Paint,
    pub side: Side,
}

/// The live nodes for one planet. `orbit_group` is the parent of everything
/// else here; `self_mesh` has no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle {
    pub self_mesh: NodeId,
    pub orbit_group: NodeId,
    pub orbit_path: NodeId,
    pub ring: Option<NodeId>,
}

pub trait SceneGraph {
    /// The top-level collection. Never moves.
    fn root(&self) -> NodeId;

    fn add_group(&mut self, parent: NodeId) -> NodeId;

    fn add_sphere(&mut self, parent: NodeId, radius: f32) -> NodeId;

    fn add_annulus(&mut self, parent: NodeId, annulus: &Annulus) -> NodeId;

    fn set_surface(&mut self, node: NodeId, surface: &Surface);

    fn set_local_translation(&mut self, node: NodeId, translation: Translation3<f32>);

    /// Replaces the node's orientation, leaving its translation alone.
    fn set_local_rotation(&mut self, node: NodeId, rotation: UnitQuaternion<f32>);
}

/// What to do when a texture can't be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexturePolicy {
    /// Fail the build.
    Strict,
    /// Log a warning and paint the node a flat color.
    Fallback,
}

/// Everything the builder and updater share: the graph they mutate and the
/// place textures come from.
pub struct SceneContext<G, T> {
    graph: G,
    textures: T,
    policy: TexturePolicy,
}

impl<G, T> SceneContext<G, T>
where
    G: SceneGraph,
    T: TextureSource,
{
    pub fn new(graph: G, textures: T, policy: TexturePolicy) -> Self {
        SceneContext {
            graph,
            textures,
            policy,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }
}
