//! Scene Manager - owner of one or more scene graphs
//!
//! Hosts that juggle several scenes (for instance one per simulated
//! environment) register them here and address them by a small integer id.

use std::sync::{Arc, RwLock};

use log::info;

use super::scene_graph::{SceneError, SceneGraph};

/// A scene graph shared across threads
///
/// The graph itself does no locking. Hosts that mutate a graph on one thread
/// while another aggregates bounding boxes must go through this lock.
pub type SharedSceneGraph = Arc<RwLock<SceneGraph>>;

/// Wrap a graph for sharing
pub fn share(graph: SceneGraph) -> SharedSceneGraph {
    Arc::new(RwLock::new(graph))
}

/// Owns scene graphs and hands out their ids
#[derive(Debug, Default)]
pub struct SceneManager {
    scene_graphs: Vec<SceneGraph>,
}

impl SceneManager {
    /// Create a manager with no scene graphs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty scene graph and return its id
    pub fn init_scene_graph(&mut self) -> usize {
        let id = self.scene_graphs.len();
        self.scene_graphs.push(SceneGraph::new());
        info!("Initialized scene graph {}", id);
        id
    }

    /// Get a scene graph by id
    pub fn scene_graph(&self, id: usize) -> Result<&SceneGraph, SceneError> {
        self.scene_graphs.get(id).ok_or(SceneError::SceneGraphNotFound(id))
    }

    /// Get a scene graph by id, mutably
    pub fn scene_graph_mut(&mut self, id: usize) -> Result<&mut SceneGraph, SceneError> {
        self.scene_graphs.get_mut(id).ok_or(SceneError::SceneGraphNotFound(id))
    }

    /// Number of scene graphs
    pub fn scene_graph_count(&self) -> usize {
        self.scene_graphs.len()
    }
}
