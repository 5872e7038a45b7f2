//! Scene graph tree
//!
//! Nodes live in a slot-map arena owned by the graph. The root is created with
//! the graph and is the only node without a parent; every other node is made
//! with [`SceneGraph::create_child`], so every live node has a finite ancestor
//! chain ending at the root. Removing a node drops its whole subtree together
//! with every feature attached inside it.

use log::{debug, trace};

use crate::foundation::collections::{NodeArena, NodeKey};
use crate::foundation::math::{compose, RigidTransform, Transformable, Vec3};

use super::aabb::AABB;
use super::feature::Feature;
use super::node::{IdentifiedEntity, NodeMut, SceneNode, SceneNodeType, ID_UNDEFINED};

/// Scene graph errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The key does not name a live node of this graph
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// The root is owned by the graph and only dies with it
    #[error("The root node cannot be removed")]
    CannotRemoveRoot,

    /// The feature was built for another node than the one it is attached to
    #[error("Feature owned by {owner:?} cannot be attached to {node:?}")]
    FeatureOwnerMismatch {
        /// Node the feature was being attached to
        node: NodeKey,
        /// Node the feature reports as its owner
        owner: NodeKey,
    },

    /// No scene graph registered under this id
    #[error("Scene graph not found: {0}")]
    SceneGraphNotFound(usize),
}

/// What a [`SceneGraph::remove_node`] call destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovedSubtree {
    /// Nodes removed, including the subtree root
    pub nodes: usize,
    /// Features dropped along with those nodes
    pub features: usize,
}

/// Tree of scene nodes rooted at a graph-owned root node
#[derive(Debug)]
pub struct SceneGraph {
    nodes: NodeArena<SceneNode>,
    root: NodeKey,
}

impl SceneGraph {
    /// Create a graph holding only its root node
    pub fn new() -> Self {
        let mut nodes = NodeArena::with_key();
        let root = nodes.insert(SceneNode::new(None, ID_UNDEFINED));
        Self { nodes, root }
    }

    /// Key of the root node
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// The root node
    pub fn root_node(&self) -> &SceneNode {
        &self.nodes[self.root]
    }

    /// The root node, mutably
    pub fn root_node_mut(&mut self) -> NodeMut<'_> {
        NodeMut::new(&mut self.nodes[self.root])
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Get a node by key, mutably
    pub fn node_mut(&mut self, key: NodeKey) -> Option<NodeMut<'_>> {
        self.nodes.get_mut(key).map(NodeMut::new)
    }

    /// Whether `key` names a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A graph always holds its root, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    fn try_node(&self, key: NodeKey) -> Result<&SceneNode, SceneError> {
        self.nodes.get(key).ok_or(SceneError::NodeNotFound(key))
    }

    fn try_node_mut(&mut self, key: NodeKey) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(key).ok_or(SceneError::NodeNotFound(key))
    }

    /// Create a new child of `parent` and return its key
    ///
    /// The child starts at the identity transform and inherits the parent's
    /// id as it is right now; later id changes on the parent do not reach it.
    pub fn create_child(&mut self, parent: NodeKey) -> Result<NodeKey, SceneError> {
        let id = self.try_node(parent)?.id();
        let child = self.nodes.insert(SceneNode::new(Some(parent), id));
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        debug!("Created scene node {:?} under {:?} (id {})", child, parent, id);
        Ok(child)
    }

    /// Remove a node and everything beneath it
    ///
    /// Every feature attached anywhere in the subtree is dropped before this
    /// returns. Keys of removed nodes become stale and are rejected by all
    /// other operations.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<RemovedSubtree, SceneError> {
        if key == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let parent = self.try_node(key)?.parent();
        if let Some(parent_node) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent_node.children.retain(|child| *child != key);
        }

        let mut removed = RemovedSubtree::default();
        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                removed.nodes += 1;
                removed.features += node.feature_count();
                pending.extend_from_slice(node.children());
            }
        }

        debug!(
            "Removed scene node {:?}: {} nodes, {} features",
            key, removed.nodes, removed.features
        );
        Ok(removed)
    }

    /// Attach a feature built by `construct`, which receives the owning node's key
    ///
    /// A feature whose `owner()` is not `node` is rejected and dropped.
    pub fn add_feature<F, C>(&mut self, node: NodeKey, construct: C) -> Result<(), SceneError>
    where
        F: Feature,
        C: FnOnce(NodeKey) -> F,
    {
        self.try_node(node)?;
        let feature = construct(node);
        if feature.owner() != node {
            return Err(SceneError::FeatureOwnerMismatch {
                node,
                owner: feature.owner(),
            });
        }
        trace!("Attaching feature {} to {:?}", feature.name(), node);
        self.try_node_mut(node)?.features.push(Box::new(feature));
        Ok(())
    }

    /// Set a node's id, notifying its features
    pub fn set_node_id(&mut self, key: NodeKey, id: i32) -> Result<(), SceneError> {
        self.try_node_mut(key)?.set_id(id);
        Ok(())
    }

    /// Parent chain of `key`, nearest first, ending at the root
    pub fn ancestors(&self, key: NodeKey) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.nodes.get(key).and_then(SceneNode::parent),
        }
    }

    /// Number of edges between `key` and the root
    pub fn depth(&self, key: NodeKey) -> Result<usize, SceneError> {
        self.try_node(key)?;
        Ok(self.ancestors(key).count())
    }

    /// `key` and all of its descendants in depth-first pre-order
    pub fn subtree(&self, key: NodeKey) -> Subtree<'_> {
        let pending = if self.contains(key) { vec![key] } else { Vec::new() };
        Subtree { graph: self, pending }
    }

    /// Nodes under `from` (inclusive) whose type is `node_type`
    pub fn nodes_of_type(&self, from: NodeKey, node_type: SceneNodeType) -> Vec<NodeKey> {
        let nodes = &self.nodes;
        self.subtree(from)
            .filter(move |key| nodes.get(*key).is_some_and(|node| node.node_type() == node_type))
            .collect()
    }

    /// Every feature of type `T` under `from` (inclusive), with its node
    pub fn find_features<T: Feature>(&self, from: NodeKey) -> Vec<(NodeKey, &T)> {
        let nodes = &self.nodes;
        self.subtree(from)
            .filter_map(move |key| {
                let feature = nodes.get(key)?.feature::<T>()?;
                Some((key, feature))
            })
            .collect()
    }

    /// Transform of `key` composed through every ancestor up to the root
    ///
    /// Recomputed on every call.
    pub fn absolute_transformation(&self, key: NodeKey) -> Result<RigidTransform, SceneError> {
        let node = self.try_node(key)?;
        let absolute = self
            .ancestors(key)
            .filter_map(|ancestor| self.nodes.get(ancestor))
            .fold(*node.transformation(), |acc, ancestor| {
                compose(ancestor.transformation(), &acc)
            });
        Ok(absolute)
    }

    /// World-space position of `key`
    pub fn absolute_translation(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(self.absolute_transformation(key)?.translation.vector)
    }

    /// Compute the cumulative bounding box of the subtree at `key`
    ///
    /// Post-order fold over an explicit stack, so tree depth is bounded by
    /// memory rather than the call stack. Every node visited caches its own
    /// cumulative box. The result is in `key`'s local frame. Safe to call
    /// repeatedly; without intervening mutation the result is identical.
    pub fn compute_cumulative_bb(&mut self, key: NodeKey) -> Result<AABB, SceneError> {
        self.try_node(key)?;
        let bounds = self.fold_cumulative_bb(key);
        trace!("Cumulative bounds of {:?}: {:?}", key, bounds);
        Ok(bounds)
    }

    fn fold_cumulative_bb(&mut self, key: NodeKey) -> AABB {
        // (node, children already folded)
        let mut pending = vec![(key, false)];
        while let Some((current, children_done)) = pending.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if !children_done {
                pending.push((current, true));
                pending.extend(node.children().iter().map(|child| (*child, false)));
                continue;
            }

            let mut bounds = *node.mesh_bb();
            for child in node.children() {
                if let Some(child_node) = self.nodes.get(*child) {
                    let child_bounds =
                        child_node.cumulative_bb().transformed(child_node.transformation());
                    bounds = bounds.union(&child_bounds);
                }
            }
            if let Some(node) = self.nodes.get_mut(current) {
                node.cumulative_bb = bounds;
            }
        }
        self.nodes.get(key).map_or_else(AABB::empty, |node| node.cumulative_bb)
    }

    /// Set the world-space box of each given node from its mesh box
    ///
    /// Which nodes hold static geometry is the caller's decision. Nodes with
    /// an empty mesh box are left untouched. Every key is checked before any
    /// node is written, so a stale key leaves the graph unchanged.
    pub fn compute_absolute_aabbs(
        &mut self,
        static_nodes: &[NodeKey],
    ) -> Result<usize, SceneError> {
        let targets = static_nodes
            .iter()
            .map(|&key| Ok((key, self.absolute_transformation(key)?)))
            .collect::<Result<Vec<_>, SceneError>>()?;

        let mut updated = 0;
        for (key, absolute) in targets {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };
            if node.mesh_bb().is_empty() {
                continue;
            }
            let world_bounds = node.mesh_bb().transformed(&absolute);
            node.set_absolute_aabb(world_bounds);
            updated += 1;
        }
        Ok(updated)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors, see [`SceneGraph::ancestors`]
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeKey>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        self.next = self.graph.nodes.get(current).and_then(SceneNode::parent);
        Some(current)
    }
}

/// Depth-first pre-order walk, see [`SceneGraph::subtree`]
pub struct Subtree<'a> {
    graph: &'a SceneGraph,
    pending: Vec<NodeKey>,
}

impl Iterator for Subtree<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.pending.pop()?;
        if let Some(node) = self.graph.nodes.get(current) {
            self.pending.extend(node.children().iter().rev());
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, from_translation, Quat};
    use approx::assert_relative_eq;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct DropCounter {
        owner: NodeKey,
        dropped: Arc<AtomicUsize>,
    }

    impl Feature for DropCounter {
        fn owner(&self) -> NodeKey {
            self.owner
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Marker {
        owner: NodeKey,
        label: &'static str,
    }

    impl Feature for Marker {
        fn owner(&self) -> NodeKey {
            self.owner
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn unit_box() -> AABB {
        AABB::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_graph_has_parentless_root() {
        let graph = SceneGraph::new();

        assert_eq!(graph.len(), 1);
        assert!(graph.root_node().is_root());
        assert_eq!(graph.root_node().id(), ID_UNDEFINED);
    }

    #[test]
    fn test_every_node_reaches_root() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.create_child(root).unwrap();
        let b = graph.create_child(a).unwrap();
        let c = graph.create_child(b).unwrap();
        let d = graph.create_child(root).unwrap();

        for key in graph.subtree(root).collect::<Vec<_>>() {
            let chain: Vec<_> = graph.ancestors(key).collect();
            if key == root {
                assert!(chain.is_empty());
            } else {
                assert_eq!(chain.last(), Some(&root));
            }
        }
        assert_eq!(graph.depth(c).unwrap(), 3);
        assert_eq!(graph.depth(d).unwrap(), 1);
        assert_eq!(graph.node(c).unwrap().parent(), Some(b));
    }

    #[test]
    fn test_child_inherits_parent_id_at_creation_only() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.set_node_id(root, 7).unwrap();

        let child = graph.create_child(root).unwrap();
        assert_eq!(graph.node(child).unwrap().id(), 7);

        graph.set_node_id(root, 9).unwrap();
        assert_eq!(graph.node(child).unwrap().id(), 7);

        let grandchild = graph.create_child(child).unwrap();
        assert_eq!(graph.node(grandchild).unwrap().id(), 7);
    }

    #[test]
    fn test_cumulative_bb_of_translated_child() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.root_node_mut().set_mesh_bb(unit_box());

        let child = graph.create_child(root).unwrap();
        let mut node = graph.node_mut(child).unwrap();
        node.set_mesh_bb(unit_box());
        node.translate(Vec3::new(2.0, 0.0, 0.0));

        let bounds = graph.compute_cumulative_bb(root).unwrap();
        assert_eq!(bounds, AABB::new(Vec3::zeros(), Vec3::new(3.0, 1.0, 1.0)));
        assert_eq!(*graph.root_node().cumulative_bb(), bounds);
        assert_eq!(*graph.node(child).unwrap().cumulative_bb(), unit_box());
    }

    #[test]
    fn test_cumulative_bb_is_idempotent() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let arm = graph.create_child(root).unwrap();
        let hand = graph.create_child(arm).unwrap();
        let mut arm_node = graph.node_mut(arm).unwrap();
        arm_node.set_transformation(from_translation(Vec3::new(0.0, 1.5, 0.0)));
        arm_node.rotate_local(Quat::from_axis_angle(&Vec3::z_axis(), 0.3));
        let mut hand_node = graph.node_mut(hand).unwrap();
        hand_node.set_mesh_bb(unit_box());
        hand_node.translate(Vec3::new(0.25, -4.0, 1.0));

        let first = graph.compute_cumulative_bb(root).unwrap();
        let second = graph.compute_cumulative_bb(root).unwrap();
        assert_eq!(first.min.map(f32::to_bits), second.min.map(f32::to_bits));
        assert_eq!(first.max.map(f32::to_bits), second.max.map(f32::to_bits));
    }

    #[test]
    fn test_cumulative_bb_without_meshes_is_empty() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let child = graph.create_child(root).unwrap();
        graph.node_mut(child).unwrap().translate(Vec3::new(5.0, 5.0, 5.0));

        assert!(graph.compute_cumulative_bb(root).unwrap().is_empty());
    }

    #[test]
    fn test_cumulative_bb_follows_rotation_of_child_frame() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let child = graph.create_child(root).unwrap();
        let mut node = graph.node_mut(child).unwrap();
        node.set_mesh_bb(unit_box());
        node.rotate(Quat::from_axis_angle(&Vec3::z_axis(), HALF_PI));

        let bounds = graph.compute_cumulative_bb(root).unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec3::new(0.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_absolute_translation_composes_ancestors() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.create_child(root).unwrap();
        let b = graph.create_child(a).unwrap();
        graph.node_mut(a).unwrap().translate(Vec3::new(1.0, 0.0, 0.0));
        graph.node_mut(b).unwrap().translate(Vec3::new(0.0, 2.0, 0.0));

        assert_relative_eq!(graph.absolute_translation(b).unwrap(), Vec3::new(1.0, 2.0, 0.0));

        // no caching: ancestor changes show up immediately
        graph.node_mut(a).unwrap().translate(Vec3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(graph.absolute_translation(b).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_remove_node_cascades_to_descendants_and_features() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let keep = graph.create_child(root).unwrap();
        let doomed = graph.create_child(root).unwrap();
        let inner = graph.create_child(doomed).unwrap();
        let leaf_a = graph.create_child(inner).unwrap();
        let leaf_b = graph.create_child(inner).unwrap();

        for key in [doomed, leaf_a, leaf_b, keep] {
            let dropped = Arc::clone(&dropped);
            graph.add_feature(key, |owner| DropCounter { owner, dropped }).unwrap();
        }
        graph.add_feature(leaf_b, |owner| Marker { owner, label: "leaf" }).unwrap();

        let removed = graph.remove_node(doomed).unwrap();
        assert_eq!(removed, RemovedSubtree { nodes: 4, features: 4 });
        assert_eq!(dropped.load(Ordering::SeqCst), 3);

        for key in [doomed, inner, leaf_a, leaf_b] {
            assert!(!graph.contains(key));
            assert_eq!(graph.create_child(key), Err(SceneError::NodeNotFound(key)));
        }
        assert_eq!(graph.root_node().children(), &[keep]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.find_features::<DropCounter>(root).len(), 1);
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        assert_eq!(graph.remove_node(root), Err(SceneError::CannotRemoveRoot));
        assert!(graph.contains(root));
    }

    #[test]
    fn test_feature_discovery_walks_nodes() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let left = graph.create_child(root).unwrap();
        let right = graph.create_child(root).unwrap();
        let left_leaf = graph.create_child(left).unwrap();

        graph.add_feature(right, |owner| Marker { owner, label: "right" }).unwrap();
        graph.add_feature(left_leaf, |owner| Marker { owner, label: "left leaf" }).unwrap();

        let found: Vec<_> = graph
            .find_features::<Marker>(root)
            .into_iter()
            .map(|(key, marker)| (key, marker.label))
            .collect();
        assert_eq!(found, vec![(left_leaf, "left leaf"), (right, "right")]);
        assert!(graph.find_features::<Marker>(left_leaf).len() == 1);
    }

    #[test]
    fn test_features_of_different_kinds_coexist() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let mut graph = SceneGraph::new();
        let node = graph.create_child(graph.root()).unwrap();

        graph.add_feature(node, |owner| Marker { owner, label: "a" }).unwrap();
        graph
            .add_feature(node, |owner| DropCounter { owner, dropped: Arc::clone(&dropped) })
            .unwrap();

        let mut scene_node = graph.node_mut(node).unwrap();
        assert_eq!(scene_node.feature_count(), 2);
        assert_eq!(scene_node.feature::<Marker>().map(|m| m.owner), Some(node));
        scene_node.feature_mut::<Marker>().unwrap().label = "b";
        assert_eq!(scene_node.feature::<Marker>().unwrap().label, "b");
    }

    #[test]
    fn test_add_feature_to_stale_node_fails() {
        let mut graph = SceneGraph::new();
        let node = graph.create_child(graph.root()).unwrap();
        graph.remove_node(node).unwrap();

        let result = graph.add_feature(node, |owner| Marker { owner, label: "late" });
        assert_eq!(result, Err(SceneError::NodeNotFound(node)));
    }

    #[test]
    fn test_nodes_of_type_and_subtree_order() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let agent = graph.create_child(root).unwrap();
        let sensor = graph.create_child(agent).unwrap();
        let camera = graph.create_child(agent).unwrap();
        graph.node_mut(agent).unwrap().set_node_type(SceneNodeType::Agent);
        graph.node_mut(sensor).unwrap().set_node_type(SceneNodeType::Sensor);
        graph.node_mut(camera).unwrap().set_node_type(SceneNodeType::Camera);

        assert_eq!(graph.subtree(root).collect::<Vec<_>>(), vec![root, agent, sensor, camera]);
        assert_eq!(graph.nodes_of_type(root, SceneNodeType::Sensor), vec![sensor]);
        assert_eq!(graph.nodes_of_type(root, SceneNodeType::Empty), vec![root]);
    }

    #[test]
    fn test_compute_absolute_aabbs_for_static_nodes() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph.create_child(root).unwrap();
        let static_mesh = graph.create_child(parent).unwrap();
        let bare = graph.create_child(parent).unwrap();
        graph.node_mut(parent).unwrap().translate(Vec3::new(0.0, 0.0, 10.0));
        graph.node_mut(static_mesh).unwrap().set_mesh_bb(unit_box());
        graph.node_mut(static_mesh).unwrap().translate(Vec3::new(1.0, 0.0, 0.0));

        let updated = graph.compute_absolute_aabbs(&[static_mesh, bare]).unwrap();
        assert_eq!(updated, 1);
        assert_eq!(
            graph.node(static_mesh).unwrap().absolute_aabb(),
            Some(AABB::new(Vec3::new(1.0, 0.0, 10.0), Vec3::new(2.0, 1.0, 11.0)))
        );
        assert_eq!(graph.node(bare).unwrap().absolute_aabb(), None);
        assert_eq!(graph.node(parent).unwrap().absolute_aabb(), None);
    }

    #[test]
    fn test_cumulative_bb_of_deep_chain() {
        const DEPTH: usize = 50_000;
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut leaf = root;
        for _ in 0..DEPTH {
            leaf = graph.create_child(leaf).unwrap();
            graph.node_mut(leaf).unwrap().translate(Vec3::new(1.0, 0.0, 0.0));
        }
        graph.node_mut(leaf).unwrap().set_mesh_bb(unit_box());

        let bounds = graph.compute_cumulative_bb(root).unwrap();
        let reach = 50_000.0_f32;
        assert_relative_eq!(bounds.min, Vec3::new(reach, 0.0, 0.0));
        assert_relative_eq!(bounds.max, Vec3::new(reach + 1.0, 1.0, 1.0));
        assert_eq!(*graph.node(leaf).unwrap().cumulative_bb(), unit_box());
        assert_eq!(graph.depth(leaf).unwrap(), DEPTH);
    }

    #[test]
    fn test_swapping_node_handles_leaves_topology_alone() {
        let mut a = SceneGraph::new();
        let mut b = SceneGraph::new();
        let a_root = a.root();
        let b_root = b.root();
        let b_child = b.create_child(b_root).unwrap();

        {
            let mut a_handle = a.node_mut(a_root).unwrap();
            let mut b_handle = b.node_mut(b_child).unwrap();
            std::mem::swap(&mut a_handle, &mut b_handle);
            // now points into graph `b`
            a_handle.set_mesh_bb(unit_box());
        }

        assert!(a.root_node().is_root());
        assert!(a.root_node().children().is_empty());
        assert_eq!(b.node(b_child).unwrap().parent(), Some(b_root));
        assert!(a.compute_cumulative_bb(a_root).unwrap().is_empty());
        assert_eq!(b.compute_cumulative_bb(b_root).unwrap(), unit_box());
    }

    #[test]
    fn test_add_feature_owned_by_another_node_is_rejected() {
        let dropped = Arc::new(AtomicUsize::new(0));
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let node = graph.create_child(root).unwrap();

        let counter = Arc::clone(&dropped);
        let result = graph.add_feature(node, |_| DropCounter { owner: root, dropped: counter });

        assert_eq!(result, Err(SceneError::FeatureOwnerMismatch { node, owner: root }));
        assert_eq!(graph.node(node).unwrap().feature_count(), 0);
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_compute_absolute_aabbs_with_stale_key_writes_nothing() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let first = graph.create_child(root).unwrap();
        let stale = graph.create_child(root).unwrap();
        let last = graph.create_child(root).unwrap();
        for key in [first, stale, last] {
            graph.node_mut(key).unwrap().set_mesh_bb(unit_box());
        }
        graph.remove_node(stale).unwrap();

        let result = graph.compute_absolute_aabbs(&[first, stale, last]);

        assert_eq!(result, Err(SceneError::NodeNotFound(stale)));
        assert_eq!(graph.node(first).unwrap().absolute_aabb(), None);
        assert_eq!(graph.node(last).unwrap().absolute_aabb(), None);
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SceneGraph>();
    }
}
