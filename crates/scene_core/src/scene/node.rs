//! Scene node
//!
//! A node carries a rigid transform relative to its parent, a semantic type
//! tag, an integer id and bounding-box state. Nodes only exist inside a
//! [`SceneGraph`](super::SceneGraph): there is no public constructor, new nodes
//! come from `SceneGraph::create_child` and the root from `SceneGraph::new`.

use std::ops::Deref;

use crate::foundation::collections::NodeKey;
use crate::foundation::math::{RigidTransform, Transformable};

use super::aabb::AABB;
use super::feature::{Feature, FeatureList};

/// Id carried by nodes that were never assigned one
pub const ID_UNDEFINED: i32 = -1;

/// Semantic type of the object attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum SceneNodeType {
    /// Plain transform node
    #[default]
    Empty,
    /// Node carrying a sensor
    Sensor,
    /// Node carrying an agent body
    Agent,
    /// Node carrying a camera
    Camera,
}

/// Something with an integer id whose changes may have side effects
pub trait IdentifiedEntity {
    /// Current id
    fn id(&self) -> i32;

    /// Assign a new id
    fn set_id(&mut self, id: i32);
}

/// Element of a scene graph
///
/// Nodes cannot be built outside the crate:
///
/// ```compile_fail
/// let orphan = scene_core::scene::SceneNode::new(None, -1);
/// ```
#[derive(Debug)]
pub struct SceneNode {
    parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    transformation: RigidTransform,
    node_type: SceneNodeType,
    id: i32,
    /// local bounding box of meshes stored at this node
    mesh_bb: AABB,
    /// bounding box of the subtree rooted here, in this node's frame
    pub(crate) cumulative_bb: AABB,
    /// world-space box, only for static meshes
    absolute_aabb: Option<AABB>,
    pub(crate) features: FeatureList,
}

impl SceneNode {
    /// Only the graph creates nodes; `parent` is `None` for the root alone.
    pub(crate) fn new(parent: Option<NodeKey>, id: i32) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transformation: RigidTransform::identity(),
            node_type: SceneNodeType::Empty,
            id,
            mesh_bb: AABB::empty(),
            cumulative_bb: AABB::empty(),
            absolute_aabb: None,
            features: FeatureList::default(),
        }
    }

    /// Parent node, `None` for the graph root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Whether this is the graph root
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Children in creation order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Get the type of the attached object
    pub fn node_type(&self) -> SceneNodeType {
        self.node_type
    }

    /// Set the type of the attached object
    pub(crate) fn set_node_type(&mut self, node_type: SceneNodeType) {
        self.node_type = node_type;
    }

    /// Local bounding box of meshes stored at this node
    pub fn mesh_bb(&self) -> &AABB {
        &self.mesh_bb
    }

    /// Set the local bounding box of meshes stored at this node
    ///
    /// Trusted input from the loader, no validation is done.
    pub(crate) fn set_mesh_bb(&mut self, mesh_bb: AABB) {
        self.mesh_bb = mesh_bb;
    }

    /// Cumulative bounding box as of the last aggregation
    ///
    /// Stale after any transform or structural change in the subtree; call
    /// `SceneGraph::compute_cumulative_bb` to refresh.
    pub fn cumulative_bb(&self) -> &AABB {
        &self.cumulative_bb
    }

    /// World-space bounding box of static meshes, if one was computed
    pub fn absolute_aabb(&self) -> Option<AABB> {
        self.absolute_aabb
    }

    /// Set the world-space bounding box of static meshes
    pub(crate) fn set_absolute_aabb(&mut self, aabb: AABB) {
        self.absolute_aabb = Some(aabb);
    }

    /// Forget the world-space bounding box
    pub(crate) fn clear_absolute_aabb(&mut self) {
        self.absolute_aabb = None;
    }

    /// First feature of type `T`
    pub fn feature<T: Feature>(&self) -> Option<&T> {
        self.features.get::<T>()
    }

    /// First feature of type `T`, mutably
    pub(crate) fn feature_mut<T: Feature>(&mut self) -> Option<&mut T> {
        self.features.get_mut::<T>()
    }

    /// All attached features in attachment order
    pub fn features(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter()
    }

    /// Number of attached features
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

impl IdentifiedEntity for SceneNode {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
        self.features.notify_id_changed(id);
    }
}

impl Transformable for SceneNode {
    fn transformation(&self) -> &RigidTransform {
        &self.transformation
    }

    fn set_transformation(&mut self, transformation: RigidTransform) {
        self.transformation = transformation;
    }
}

/// Exclusive access to one node, see `SceneGraph::node_mut`
///
/// Transform, type, id, bounding boxes and features are writable through the
/// handle. Parent and children are not: the handle never yields a
/// `&mut SceneNode`, so nodes cannot be swapped or replaced wholesale.
///
/// ```compile_fail
/// use scene_core::scene::SceneGraph;
///
/// let mut a = SceneGraph::new();
/// let mut b = SceneGraph::new();
/// let (a_root, b_root) = (a.root(), b.root());
/// std::mem::swap(&mut *a.node_mut(a_root).unwrap(), &mut *b.node_mut(b_root).unwrap());
/// ```
#[derive(Debug)]
pub struct NodeMut<'a> {
    node: &'a mut SceneNode,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(node: &'a mut SceneNode) -> Self {
        Self { node }
    }

    /// Set the type of the attached object
    pub fn set_node_type(&mut self, node_type: SceneNodeType) {
        self.node.set_node_type(node_type);
    }

    /// Set the local bounding box of meshes stored at this node
    pub fn set_mesh_bb(&mut self, mesh_bb: AABB) {
        self.node.set_mesh_bb(mesh_bb);
    }

    /// Set the world-space bounding box of static meshes
    pub fn set_absolute_aabb(&mut self, aabb: AABB) {
        self.node.set_absolute_aabb(aabb);
    }

    /// Forget the world-space bounding box
    pub fn clear_absolute_aabb(&mut self) {
        self.node.clear_absolute_aabb();
    }

    /// First feature of type `T`, mutably
    pub fn feature_mut<T: Feature>(&mut self) -> Option<&mut T> {
        self.node.feature_mut::<T>()
    }
}

impl Deref for NodeMut<'_> {
    type Target = SceneNode;

    fn deref(&self) -> &SceneNode {
        self.node
    }
}

impl IdentifiedEntity for NodeMut<'_> {
    fn id(&self) -> i32 {
        self.node.id()
    }

    fn set_id(&mut self, id: i32) {
        self.node.set_id(id);
    }
}

impl Transformable for NodeMut<'_> {
    fn transformation(&self) -> &RigidTransform {
        self.node.transformation()
    }

    fn set_transformation(&mut self, transformation: RigidTransform) {
        self.node.set_transformation(transformation);
    }
}
