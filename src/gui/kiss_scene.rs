use std::cell::RefCell;
use std::rc::Rc;

use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Translation3, UnitQuaternion, Vector3};

use crate::math::geometry::Annulus;
use crate::scene::{NodeId, Paint, SceneGraph, Side, Surface};

/// [SceneGraph] over kiss3d's scene nodes.
///
/// Scene nodes are shared handles, so holding clones here keeps working
/// after the window itself has been moved into its render loop.
pub struct KissScene {
    nodes: Vec<SceneNode>,
}

impl KissScene {
    /// Must be created after the window, since adding geometry needs its GL
    /// context.
    pub fn new(window: &mut Window) -> Self {
        KissScene {
            nodes: vec![window.scene_mut().clone()],
        }
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.index()]
    }
}

impl SceneGraph for KissScene {
    fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn add_group(&mut self, parent: NodeId) -> NodeId {
        let group = self.node_mut(parent).add_group();
        self.push(group)
    }

    fn add_sphere(&mut self, parent: NodeId, radius: f32) -> NodeId {
        let sphere = self.node_mut(parent).add_sphere(radius);
        self.push(sphere)
    }

    fn add_annulus(&mut self, parent: NodeId, annulus: &Annulus) -> NodeId {
        // Every annulus gets its own mesh; nothing is shared between bodies
        let data = annulus.mesh();
        let mesh = Mesh::new(
            data.coords,
            data.faces,
            Some(data.normals),
            Some(data.uvs),
            false,
        );
        let node = self
            .node_mut(parent)
            .add_mesh(Rc::new(RefCell::new(mesh)), Vector3::from_element(1.0));
        self.push(node)
    }

    fn set_surface(&mut self, node: NodeId, surface: &Surface) {
        let node = self.node_mut(node);
        match &surface.paint {
            Paint::Texture(texture) => node.set_texture_from_file(&texture.path, &texture.name),
            Paint::Color(color) => node.set_color(color.x, color.y, color.z),
        }
        // kiss3d only knows culled or not, so inside-out also means both sides
        node.enable_backface_culling(surface.side == Side::Front);
    }

    fn set_local_translation(&mut self, node: NodeId, translation: Translation3<f32>) {
        self.node_mut(node).set_local_translation(translation);
    }

    fn set_local_rotation(&mut self, node: NodeId, rotation: UnitQuaternion<f32>) {
        self.node_mut(node).set_local_rotation(rotation);
    }
}
