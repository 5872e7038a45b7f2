//! Stock features
//!
//! Small capabilities that hosts commonly attach to nodes. They carry handles
//! into external systems (renderer, sensor suite) rather than the resources
//! themselves.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::foundation::collections::NodeKey;

use super::feature::Feature;

/// Marks a node as drawable with a named mesh
#[derive(Debug, Clone)]
pub struct RenderFeature {
    owner: NodeKey,
    /// Handle of the mesh asset in the renderer's library
    pub mesh_handle: String,
    /// Whether the renderer should draw this node
    pub visible: bool,
}

impl RenderFeature {
    /// Create a visible render feature for `owner`
    pub fn new(owner: NodeKey, mesh_handle: impl Into<String>) -> Self {
        Self {
            owner,
            mesh_handle: mesh_handle.into(),
            visible: true,
        }
    }
}

impl Feature for RenderFeature {
    fn owner(&self) -> NodeKey {
        self.owner
    }

    fn name(&self) -> &'static str {
        "render"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Describes a sensor mounted at a node
#[derive(Debug, Clone)]
pub struct SensorFeature {
    owner: NodeKey,
    /// Unique sensor name, e.g. `"rgb"` or `"depth"`
    pub uuid: String,
    /// Output resolution as (height, width)
    pub resolution: (u32, u32),
}

impl SensorFeature {
    /// Create a sensor feature for `owner`
    pub fn new(owner: NodeKey, uuid: impl Into<String>, resolution: (u32, u32)) -> Self {
        Self {
            owner,
            uuid: uuid.into(),
            resolution,
        }
    }
}

impl Feature for SensorFeature {
    fn owner(&self) -> NodeKey {
        self.owner
    }

    fn name(&self) -> &'static str {
        "sensor"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Shared node → render id table read by a renderer for picking
pub type RenderIdCache = Arc<RwLock<HashMap<NodeKey, i32>>>;

/// Mirrors its node's id into a [`RenderIdCache`]
///
/// The entry is written whenever the node id changes and removed when the
/// feature is dropped together with its node.
#[derive(Debug)]
pub struct SemanticIdFeature {
    owner: NodeKey,
    cache: RenderIdCache,
}

impl SemanticIdFeature {
    /// Bind to `owner`, recording `initial_id` in the cache
    pub fn new(owner: NodeKey, initial_id: i32, cache: RenderIdCache) -> Self {
        let feature = Self { owner, cache };
        feature.write_id(initial_id);
        feature
    }

    fn write_id(&self, id: i32) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(self.owner, id);
    }
}

impl Feature for SemanticIdFeature {
    fn owner(&self) -> NodeKey {
        self.owner
    }

    fn name(&self) -> &'static str {
        "semantic_id"
    }

    fn on_node_id_changed(&mut self, id: i32) {
        self.write_id(id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Drop for SemanticIdFeature {
    fn drop(&mut self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.owner);
    }
}
