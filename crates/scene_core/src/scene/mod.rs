//! Scene graph system
//!
//! A tree of nodes carrying rigid transforms, semantic type tags, ids and
//! bounding-box state, with features attached to individual nodes.
//!
//! ## Architecture
//!
//! ```text
//! SceneManager
//!      ↓ owns
//! SceneGraph (arena + root)
//!      ↓ owns
//! SceneNode ──owns──▶ Feature (render, sensor, ...)
//! ```
//!
//! Bounding data is pull-based: loaders set mesh boxes, the host calls
//! `SceneGraph::compute_cumulative_bb` when it needs fresh cumulative boxes.

mod aabb;
mod feature;
mod features;
mod node;
mod scene_graph;
mod scene_manager;

pub use aabb::AABB;
pub use feature::Feature;
pub use features::{RenderFeature, RenderIdCache, SemanticIdFeature, SensorFeature};
pub use node::{IdentifiedEntity, NodeMut, SceneNode, SceneNodeType, ID_UNDEFINED};
pub use scene_graph::{Ancestors, RemovedSubtree, SceneError, SceneGraph, Subtree};
pub use scene_manager::{share, SceneManager, SharedSceneGraph};
