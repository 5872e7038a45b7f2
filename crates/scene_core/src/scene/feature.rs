//! Feature trait
//!
//! A feature is a capability (sensor, renderable, ...) attached to exactly one
//! scene node for its whole lifetime. Features are owned by their node and are
//! dropped with it; there is no global feature registry, so discovery walks
//! the node tree.

use std::any::Any;

use crate::foundation::collections::NodeKey;

/// Capability attached to a single scene node
///
/// Features are constructed through [`SceneGraph::add_feature`], which hands
/// the owning node's key to the constructor. They cannot be moved to another
/// node afterwards.
///
/// [`SceneGraph::add_feature`]: crate::scene::SceneGraph::add_feature
pub trait Feature: Any + Send + Sync {
    /// Key of the node this feature is bound to
    fn owner(&self) -> NodeKey;

    /// Short human-readable name for logging
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called after the owning node's id changed
    ///
    /// Features that mirror the node id into an external resource (for
    /// instance a render-id cache) override this.
    fn on_node_id_changed(&mut self, _id: i32) {}

    /// Upcast for typed lookups
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed lookups
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Features owned by one node, in attachment order
#[derive(Default)]
pub(crate) struct FeatureList {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureList {
    pub(crate) fn push(&mut self, feature: Box<dyn Feature>) {
        self.features.push(feature);
    }

    pub(crate) fn len(&self) -> usize {
        self.features.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|feature| feature.as_ref())
    }

    pub(crate) fn get<T: Feature>(&self) -> Option<&T> {
        self.features
            .iter()
            .find_map(|feature| feature.as_any().downcast_ref::<T>())
    }

    pub(crate) fn get_mut<T: Feature>(&mut self) -> Option<&mut T> {
        self.features
            .iter_mut()
            .find_map(|feature| feature.as_any_mut().downcast_mut::<T>())
    }

    pub(crate) fn notify_id_changed(&mut self, id: i32) {
        for feature in &mut self.features {
            feature.on_node_id_changed(id);
        }
    }
}

impl std::fmt::Debug for FeatureList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.features.iter().map(|feature| feature.name()))
            .finish()
    }
}
